//! Configuration file formats.
//!
//! This module provides:
//! - The [`FormatReader`] trait turning file contents into a mapping
//! - Built-in readers for TOML, YAML and JSON ([`TomlReader`], [`YamlReader`], [`JsonReader`])
//! - [`FormatRegistry`], which picks a reader from a file's extension
//!
//! # Registry Semantics
//!
//! - Extensions are matched case-sensitively, without the leading dot
//! - Re-registering an extension replaces its reader and logs a warning
//! - The registry is a plain value: share it behind a lock if several
//!   threads register readers

mod readers;

#[cfg(test)]
mod readers_tests;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::parser::ConfigParser;

pub use readers::{JsonReader, TomlReader, YamlReader};

/// Trait for reading a configuration document into a mapping.
///
/// Implementations only decode text; environment references, schema
/// derivation and command-line overrides are applied afterwards.
pub trait FormatReader: Send + Sync {
    /// Decodes a document.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text is malformed or its root is
    /// not a mapping.
    fn parse(&self, text: &str) -> Result<Map<String, Value>, ConfigError>;

    /// Reads and decodes the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be read, or
    /// any error from [`FormatReader::parse`].
    fn read(&self, path: &Path) -> Result<Map<String, Value>, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read config file");
        self.parse(&text)
    }
}

/// One or more file extensions, as accepted by [`FormatRegistry::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions(Vec<String>);

impl Extensions {
    /// The extensions, in the given order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Extensions {
    fn from(extension: &str) -> Self {
        Self(vec![extension.to_owned()])
    }
}

impl From<String> for Extensions {
    fn from(extension: String) -> Self {
        Self(vec![extension])
    }
}

impl From<&[&str]> for Extensions {
    fn from(extensions: &[&str]) -> Self {
        Self(extensions.iter().map(|&e| e.to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Extensions {
    fn from(extensions: [&str; N]) -> Self {
        Self(extensions.iter().map(|&e| e.to_owned()).collect())
    }
}

impl From<Vec<String>> for Extensions {
    fn from(extensions: Vec<String>) -> Self {
        Self(extensions)
    }
}

/// Maps file extensions to readers.
///
/// [`FormatRegistry::default`] binds `yml`, `yaml`, `toml` and `json`;
/// [`FormatRegistry::new`] starts empty.
#[derive(Clone)]
pub struct FormatRegistry {
    readers: Vec<(String, Arc<dyn FormatReader>)>,
}

impl FormatRegistry {
    /// Creates a registry with no readers.
    #[must_use]
    pub const fn new() -> Self {
        Self { readers: Vec::new() }
    }

    /// Creates a registry with the built-in readers.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(["yml", "yaml"], YamlReader);
        registry.register("toml", TomlReader);
        registry.register("json", JsonReader);
        registry
    }

    /// Binds `extensions` to `reader`.
    ///
    /// An extension that is already bound keeps its position in
    /// [`FormatRegistry::extensions`] but switches to the new reader.
    /// Returns the extensions that were replaced.
    pub fn register(
        &mut self,
        extensions: impl Into<Extensions>,
        reader: impl FormatReader + 'static,
    ) -> Vec<String> {
        let reader: Arc<dyn FormatReader> = Arc::new(reader);
        let mut replaced = Vec::new();

        for extension in extensions.into().0 {
            if let Some((_, bound)) = self.readers.iter_mut().find(|(e, _)| *e == extension) {
                tracing::warn!(%extension, "format is already registered, the reader will be overwritten");
                *bound = Arc::clone(&reader);
                replaced.push(extension);
            } else {
                self.readers.push((extension, Arc::clone(&reader)));
            }
        }
        replaced
    }

    /// Returns the reader bound to the extension of `filename`.
    ///
    /// The extension is the text after the last `.` of the file name;
    /// names like `.bashrc` or `noext` have an empty extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] listing the registered
    /// extensions if none matches.
    pub fn get(&self, filename: impl AsRef<Path>) -> Result<Arc<dyn FormatReader>, ConfigError> {
        let extension = filename
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.readers
            .iter()
            .find(|(e, _)| *e == extension)
            .map(|(_, reader)| Arc::clone(reader))
            .ok_or_else(|| ConfigError::UnsupportedFormat {
                extension,
                supported: self.extensions().map(str::to_owned).collect(),
            })
    }

    /// Creates a parser for `filename` using the matching reader.
    ///
    /// The file is not read until the parser runs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] if no reader matches.
    pub fn parser(&self, filename: impl AsRef<Path>) -> Result<ConfigParser, ConfigError> {
        let path = filename.as_ref();
        let reader = self.get(path)?;
        Ok(ConfigParser::new(path, reader))
    }

    /// Registered extensions, in registration order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.readers.iter().map(|(e, _)| e.as_str())
    }

    /// Returns true if `extension` has a reader.
    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        self.readers.iter().any(|(e, _)| e == extension)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("extensions", &self.extensions().collect::<Vec<_>>())
            .finish()
    }
}

/// Name of a node's kind, for error messages.
pub(crate) const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
