//! confargs: layered configuration from a file, the environment and the command line
//!
//! A configuration file (TOML, YAML or JSON) is read into a tree, `${NAME}`
//! environment references inside it are substituted, and every leaf becomes a
//! `--<dotted.key>` command-line flag whose default is the file's value. The
//! merged result is a [`Namespace`] addressable by nested or dotted keys.
//!
//! ```no_run
//! let ns = confargs::from_file("config.toml")?.parse()?;
//! println!("{:?}", ns["database.ports"]);
//! # Ok::<(), confargs::ConfigError>(())
//! ```

pub mod env;
pub mod error;
pub mod format;
pub mod literal;
pub mod namespace;
pub mod parser;
pub mod schema;
pub mod types;

#[cfg(test)]
mod namespace_tests;

use std::path::Path;

pub use env::{EnvResolver, EnvSource, ProcessEnv, Warning, WarningKind};
pub use error::ConfigError;
pub use format::{FormatReader, FormatRegistry};
pub use namespace::{Entry, Namespace, NamespaceError};
pub use parser::{ConfigParser, Resolved};
pub use schema::Schema;
pub use types::ValueType;

/// Creates a parser for `path` using the built-in readers.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedFormat`] if the extension is not one of
/// `yml`, `yaml`, `toml` or `json`.
pub fn from_file(path: impl AsRef<Path>) -> Result<ConfigParser, ConfigError> {
    FormatRegistry::with_defaults().parser(path)
}
