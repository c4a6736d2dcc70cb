//! CLI argument parsing using clap.
//!
//! The tool's own options come before the config path; every token after
//! it is passed through untouched as a config override.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// confargs: resolve a configuration file into one namespace
///
/// Reads CONFIG, substitutes `${NAME}` environment references and applies
/// `--<dotted.key> value` overrides, then prints the merged configuration.
#[derive(Debug, Parser)]
#[command(name = "confargs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format of the resolved configuration
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Path to the configuration file (.toml, .yaml, .yml or .json)
    pub config: PathBuf,

    /// Overrides for config keys, e.g. `--database.port 5432`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OVERRIDES")]
    pub overrides: Vec<OsString>,
}

/// Serialization used when printing the resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[value(name = "json")]
    Json,
    /// YAML
    #[value(name = "yaml")]
    Yaml,
    /// TOML (fails on `null` values)
    #[value(name = "toml")]
    Toml,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Tokens handed to the config parser: the program name, then overrides.
    pub fn override_args(&self) -> impl Iterator<Item = OsString> + '_ {
        std::iter::once(OsString::from("confargs")).chain(self.overrides.iter().cloned())
    }
}
