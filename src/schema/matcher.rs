//! Matching command-line tokens against a [`Schema`] with clap.
//!
//! Tokens are pre-filtered so that only declared flags reach clap: unknown
//! flags and positional leftovers are dropped instead of failing the parse.
//! Each kept flag is normalized to `--name=value` so values starting with
//! `-` are never mistaken for flags.

use std::ffi::{OsStr, OsString};

use clap::{Arg, ArgAction, Command};
use serde_json::Value;

use crate::error::ConfigError;

use super::{Declaration, Schema};

impl Declaration {
    fn arg(&self) -> Arg {
        let kind = self.kind;
        Arg::new(self.name.clone())
            .long(self.name.clone())
            .value_name(kind.value_name())
            .action(ArgAction::Set)
            .num_args(1)
            .value_parser(move |token: &str| kind.parse(token))
    }
}

impl Schema {
    /// Builds the clap command accepting every declared flag.
    ///
    /// Help and version flags are disabled so config keys named `help` or
    /// `version` are plain flags. Repeating a flag keeps the last value.
    #[must_use]
    pub fn command(&self) -> Command {
        self.iter().fold(
            Command::new(env!("CARGO_PKG_NAME"))
                .disable_help_flag(true)
                .disable_version_flag(true)
                .args_override_self(true),
            |command, declaration| command.arg(declaration.arg()),
        )
    }

    /// Parses command-line tokens and overlays them on the config defaults.
    ///
    /// The first token is the program name. Returns `(dotted name, value)`
    /// pairs in schema order; flags with neither a command-line value nor a
    /// default are omitted.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidArgument`] if a value cannot be read as its
    ///   declared type, or a flag is missing its value
    /// - [`ConfigError::MissingArguments`] if required flags are absent
    pub fn overrides_from<I, T>(&self, args: I) -> Result<Vec<(String, Value)>, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let tokens: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let known = self.known_tokens(&tokens);
        tracing::debug!(
            given = tokens.len().saturating_sub(1),
            kept = known.len().saturating_sub(1),
            "matched command-line tokens"
        );

        let matches = self
            .command()
            .try_get_matches_from(known)
            .map_err(ConfigError::InvalidArgument)?;

        let missing: Vec<String> = self
            .iter()
            .filter(|d| d.required && !matches.contains_id(&d.name))
            .map(Declaration::flag)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingArguments { flags: missing });
        }

        Ok(self
            .iter()
            .filter_map(|declaration| {
                matches
                    .get_one::<Value>(&declaration.name)
                    .cloned()
                    .or_else(|| declaration.default.clone())
                    .map(|value| (declaration.name.clone(), value))
            })
            .collect())
    }

    /// Keeps the program name and every declared flag with its value.
    ///
    /// Both `--name value` and `--name=value` are accepted. A declared flag
    /// followed by another `--` token or by nothing is kept bare, so clap
    /// reports the missing value.
    fn known_tokens(&self, tokens: &[OsString]) -> Vec<OsString> {
        let mut iter = tokens.iter();
        let mut known: Vec<OsString> = iter.next().cloned().into_iter().collect();
        let mut iter = iter.peekable();

        while let Some(token) = iter.next() {
            let Some(flag) = token.to_str().and_then(|t| t.strip_prefix("--")) else {
                continue;
            };
            let (name, inline) = match flag.split_once('=') {
                Some((name, _)) => (name, true),
                None => (flag, false),
            };
            if !self.contains(name) {
                continue;
            }

            if inline {
                known.push(token.clone());
            } else if let Some(value) = iter.next_if(|next| !is_long_flag(next)) {
                let mut joined = OsString::from(token);
                joined.push("=");
                joined.push(value);
                known.push(joined);
            } else {
                known.push(token.clone());
            }
        }
        known
    }
}

fn is_long_flag(token: &OsStr) -> bool {
    token.to_str().is_some_and(|t| t.starts_with("--"))
}
