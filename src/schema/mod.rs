//! Command-line schema derived from configuration keys.
//!
//! Every leaf of a resolved configuration mapping becomes one
//! `--<dotted.key>` flag:
//!
//! | Leaf | Flag |
//! |------|------|
//! | `"?:int"`, `"?:float"`, `"?:str"`, `"?:bool"` | required, of that type |
//! | `"?:list[int]"`, `"?:list[float]"` | optional, comma-separated, no default |
//! | other string | optional text, defaulting to the leaf |
//! | boolean | optional, read from the boolean token set |
//! | integer / float | optional, of the leaf's type |
//! | list / `null` | optional, read as a structural literal |
//!
//! Nested mappings produce no flag of their own; their keys are joined with
//! `.` onto the parent key.

mod matcher;

#[cfg(test)]
mod matcher_tests;

use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::literal;
use crate::types::{CastError, ValueType};

/// Prefix marking a leaf that must be supplied on the command line.
pub const REQUIRED_MARKER: &str = "?:";

/// How a flag's token is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Read as the given type.
    Typed(ValueType),
    /// Read as a structural literal, falling back to the raw text.
    ///
    /// With `list` set, a non-list result is wrapped in a one-element list.
    Literal {
        /// Whether the config value was a list
        list: bool,
    },
}

impl ArgKind {
    /// Reads one command-line token.
    ///
    /// # Errors
    ///
    /// Returns [`CastError`] if a typed token is invalid. Literal tokens
    /// never fail.
    pub fn parse(self, token: &str) -> Result<Value, CastError> {
        match self {
            Self::Typed(ty) => ty.parse_token(token),
            Self::Literal { list } => match literal::parse_or_text(token) {
                Value::Array(items) => Ok(Value::Array(items)),
                single if list => Ok(Value::Array(vec![single])),
                other => Ok(other),
            },
        }
    }

    /// Placeholder shown for the flag value in usage text.
    const fn value_name(self) -> &'static str {
        match self {
            Self::Typed(ValueType::Int) => "INT",
            Self::Typed(ValueType::Float) => "FLOAT",
            Self::Typed(ValueType::Str) => "TEXT",
            Self::Typed(ValueType::Bool) => "BOOL",
            Self::Typed(ValueType::IntList) => "INT,...",
            Self::Typed(ValueType::FloatList) => "FLOAT,...",
            Self::Literal { list: true } => "LIST",
            Self::Literal { list: false } => "VALUE",
        }
    }
}

/// One `--<name>` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Fully-qualified dotted key, also the flag name.
    pub name: String,
    /// How the token is read.
    pub kind: ArgKind,
    /// Value used when the flag is absent.
    pub default: Option<Value>,
    /// Whether absence is an error.
    pub required: bool,
}

impl Declaration {
    /// An optional flag defaulting to `default`.
    #[must_use]
    pub fn optional(name: impl Into<String>, kind: ArgKind, default: Value) -> Self {
        Self {
            name: name.into(),
            kind,
            default: Some(default),
            required: false,
        }
    }

    /// A flag declared by a `?:` marker.
    ///
    /// Scalar types are required; list types are optional without default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownType`] for an unsupported type name.
    pub fn from_marker(name: impl Into<String>, type_name: &str) -> Result<Self, ConfigError> {
        let name = name.into();
        let Some(ty) = ValueType::from_name(type_name) else {
            return Err(ConfigError::UnknownType {
                key: name,
                type_name: type_name.to_owned(),
            });
        };
        Ok(Self {
            name,
            kind: ArgKind::Typed(ty),
            default: None,
            required: !ty.is_list(),
        })
    }

    /// The flag as written on the command line.
    #[must_use]
    pub fn flag(&self) -> String {
        format!("--{}", self.name)
    }
}

/// Ordered set of flag declarations, unique by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    declarations: Vec<Declaration>,
}

impl Schema {
    /// Derives the schema of a configuration mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownType`] if a `?:` marker names an
    /// unsupported type.
    pub fn compile(config: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut schema = Self::default();
        schema.declare_all(config, None)?;
        tracing::debug!(flags = schema.len(), "compiled command-line schema");
        Ok(schema)
    }

    fn declare_all(&mut self, map: &Map<String, Value>, parent: Option<&str>) -> Result<(), ConfigError> {
        for (key, value) in map {
            let name = parent.map_or_else(|| key.clone(), |parent| format!("{parent}.{key}"));
            let declaration = match value {
                Value::Object(nested) => {
                    self.declare_all(nested, Some(&name))?;
                    continue;
                }
                Value::String(text) => match required_type(text) {
                    Some(type_name) => Declaration::from_marker(name, &type_name)?,
                    None => Declaration::optional(name, ArgKind::Typed(ValueType::Str), value.clone()),
                },
                Value::Bool(_) => Declaration::optional(name, ArgKind::Typed(ValueType::Bool), value.clone()),
                Value::Number(number) if number.is_f64() => {
                    Declaration::optional(name, ArgKind::Typed(ValueType::Float), value.clone())
                }
                Value::Number(_) => Declaration::optional(name, ArgKind::Typed(ValueType::Int), value.clone()),
                Value::Array(_) => Declaration::optional(name, ArgKind::Literal { list: true }, value.clone()),
                Value::Null => Declaration::optional(name, ArgKind::Literal { list: false }, Value::Null),
            };
            self.push(declaration);
        }
        Ok(())
    }

    /// Adds a declaration, replacing any existing one with the same name.
    pub fn push(&mut self, declaration: Declaration) {
        match self.declarations.iter_mut().find(|d| d.name == declaration.name) {
            Some(existing) => *existing = declaration,
            None => self.declarations.push(declaration),
        }
    }

    /// Looks a declaration up by dotted name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// Returns true if a flag named `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declarations in config order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Type name of a `?:` marker, with all whitespace removed.
fn required_type(text: &str) -> Option<String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.strip_prefix(REQUIRED_MARKER).map(str::to_owned)
}
