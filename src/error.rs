//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::namespace::NamespaceError;

/// Error type for a configuration resolution pass.
///
/// Every variant aborts the pass. Recoverable issues (unset variables,
/// failed casts) are reported as [`crate::env::Warning`] instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to parse a YAML configuration.
    #[error("Failed to parse YAML config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Failed to parse a JSON configuration.
    #[error("Failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The document parsed, but its root is not a mapping.
    #[error("Configuration root must be a mapping, found {found}")]
    NotAMapping {
        /// Kind of node found at the root
        found: &'static str,
    },

    /// No reader is registered for the file extension.
    #[error(
        "Could not infer reader from file type. Unknown file format: \"{extension}\". \
         Supported formats are: [{}].",
        .supported.join(", ")
    )]
    UnsupportedFormat {
        /// Extension of the requested file, without the leading dot
        extension: String,
        /// Extensions registered at lookup time, in registration order
        supported: Vec<String>,
    },

    /// A `?:` marker names a type that is not supported.
    #[error("Unknown type '{type_name}' in required marker for '{key}'")]
    UnknownType {
        /// Dotted key carrying the marker
        key: String,
        /// Type name after `?:`, whitespace removed
        type_name: String,
    },

    /// Required flags were not supplied on the command line.
    #[error("Missing required arguments: {}", .flags.join(", "))]
    MissingArguments {
        /// Missing flags, `--` prefix included
        flags: Vec<String>,
    },

    /// A command-line value could not be read as the declared type.
    #[error("Invalid command-line argument: {0}")]
    InvalidArgument(#[source] clap::Error),

    /// Rebuilding the namespace from dotted keys failed.
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl ConfigError {
    /// Returns true if the error was raised while reading or decoding a file.
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. }
                | Self::TomlParse(_)
                | Self::YamlParse(_)
                | Self::JsonParse(_)
                | Self::NotAMapping { .. }
                | Self::UnsupportedFormat { .. }
        )
    }
}
