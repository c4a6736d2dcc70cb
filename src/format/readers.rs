//! Built-in TOML, YAML and JSON readers.

use serde_json::{Map, Value};

use crate::error::ConfigError;

use super::{FormatReader, kind_name};

fn into_mapping(value: Value) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::NotAMapping {
            found: kind_name(&other),
        }),
    }
}

/// Reads TOML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlReader;

impl FormatReader for TomlReader {
    fn parse(&self, text: &str) -> Result<Map<String, Value>, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Reads YAML documents.
///
/// An empty document is an empty mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlReader;

impl FormatReader for YamlReader {
    fn parse(&self, text: &str) -> Result<Map<String, Value>, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_yaml::from_str::<Value>(text)? {
            Value::Null => Ok(Map::new()),
            value => into_mapping(value),
        }
    }
}

/// Reads JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

impl FormatReader for JsonReader {
    fn parse(&self, text: &str) -> Result<Map<String, Value>, ConfigError> {
        into_mapping(serde_json::from_str(text)?)
    }
}
