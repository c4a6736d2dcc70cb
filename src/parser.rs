//! Resolution of a configuration file into a [`Namespace`].
//!
//! One pass runs the stages in order:
//!
//! 1. Read the file with the [`FormatReader`] chosen for its extension
//! 2. Substitute `${...}` environment references ([`EnvResolver`])
//! 3. Derive a `--<dotted.key>` flag per leaf ([`Schema::compile`])
//! 4. Match the command line against those flags, config values as defaults
//! 5. Rebuild the nested [`Namespace`] from the dotted keys

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::env::{EnvResolver, EnvSource, ProcessEnv, Warning};
use crate::error::ConfigError;
use crate::format::FormatReader;
use crate::namespace::Namespace;
use crate::schema::Schema;

/// Outcome of a successful pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The merged configuration
    pub namespace: Namespace,
    /// Non-fatal issues raised while substituting environment references
    pub warnings: Vec<Warning>,
}

/// Resolves one configuration file against the environment and command line.
///
/// Created by [`crate::FormatRegistry::parser`] or directly from a reader.
/// Reads the process environment unless another [`EnvSource`] is supplied
/// with [`ConfigParser::with_env`].
#[derive(Clone)]
pub struct ConfigParser<E = ProcessEnv> {
    path: PathBuf,
    reader: Arc<dyn FormatReader>,
    env: E,
}

impl ConfigParser {
    /// Creates a parser reading `path` with `reader`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, reader: Arc<dyn FormatReader>) -> Self {
        Self {
            path: path.into(),
            reader,
            env: ProcessEnv,
        }
    }
}

impl<E: EnvSource> ConfigParser<E> {
    /// Replaces the environment references are resolved against.
    #[must_use]
    pub fn with_env<F: EnvSource>(self, env: F) -> ConfigParser<F> {
        ConfigParser {
            path: self.path,
            reader: self.reader,
            env,
        }
    }

    /// Path of the configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves against the process command line.
    ///
    /// # Errors
    ///
    /// See [`ConfigParser::parse_from`].
    pub fn parse(&self) -> Result<Namespace, ConfigError> {
        self.parse_from(std::env::args_os())
    }

    /// Resolves against `args`, whose first item is the program name.
    ///
    /// Warnings are logged and discarded; use
    /// [`ConfigParser::resolve_from`] to inspect them.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::FileRead`] or a parse error if the file cannot be decoded
    /// - [`ConfigError::UnknownType`] if a `?:` marker names an unsupported type
    /// - [`ConfigError::MissingArguments`] if a required flag is absent
    /// - [`ConfigError::InvalidArgument`] if a flag value is invalid
    /// - [`ConfigError::Namespace`] if dotted keys collide with values
    pub fn parse_from<I, T>(&self, args: I) -> Result<Namespace, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.resolve_from(args).map(|resolved| resolved.namespace)
    }

    /// Resolves against `args` and also returns the warnings raised.
    ///
    /// # Errors
    ///
    /// See [`ConfigParser::parse_from`].
    pub fn resolve_from<I, T>(&self, args: I) -> Result<Resolved, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut config = self.reader.read(&self.path)?;
        let warnings = EnvResolver::new(&self.env).resolve(&mut config);
        let schema = Schema::compile(&config)?;

        let mut namespace = Namespace::new();
        for (key, value) in schema.overrides_from(args)? {
            namespace.set(&key, value)?;
        }

        tracing::debug!(
            path = %self.path.display(),
            keys = namespace.len(),
            warnings = warnings.len(),
            "resolved configuration"
        );
        Ok(Resolved {
            namespace,
            warnings,
        })
    }
}

impl<E: fmt::Debug> fmt::Debug for ConfigParser<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigParser")
            .field("path", &self.path)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}
