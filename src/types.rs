//! Value types named in markers and environment references.
//!
//! Type names are resolved through a closed table ([`ValueType::from_name`])
//! rather than by runtime lookup, so an unknown name is rejected up front.

use std::fmt;

use serde_json::{Number, Value};
use thiserror::Error;

use crate::literal;

/// Tokens accepted as `true` when casting to [`ValueType::Bool`] (case-insensitive).
pub const TRUE_TOKENS: [&str; 5] = ["yes", "true", "t", "y", "1"];

/// Tokens accepted as `false` when casting to [`ValueType::Bool`] (case-insensitive).
pub const FALSE_TOKENS: [&str; 5] = ["no", "false", "f", "n", "0"];

/// A value could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot cast '{value}' to {target}")]
pub struct CastError {
    /// Rendered form of the offending value
    pub value: String,
    /// Requested type
    pub target: ValueType,
}

impl CastError {
    fn new(value: &Value, target: ValueType) -> Self {
        Self {
            value: literal::render(value),
            target,
        }
    }

    fn token(token: &str, target: ValueType) -> Self {
        Self {
            value: token.to_owned(),
            target,
        }
    }
}

/// Supported value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Text
    Str,
    /// Boolean, read from [`TRUE_TOKENS`] / [`FALSE_TOKENS`]
    Bool,
    /// Comma-separated list of integers
    IntList,
    /// Comma-separated list of floats
    FloatList,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ValueType {
    /// Every supported type, in table order.
    pub const ALL: [Self; 6] = [
        Self::Int,
        Self::Float,
        Self::Str,
        Self::Bool,
        Self::IntList,
        Self::FloatList,
    ];

    /// Looks a type up by its marker name (`int`, `list[float]`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    /// Marker name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bool => "bool",
            Self::IntList => "list[int]",
            Self::FloatList => "list[float]",
        }
    }

    /// Returns true for the list types.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::IntList | Self::FloatList)
    }

    /// Element type of a list type; scalar types are their own element.
    #[must_use]
    pub const fn element(self) -> Self {
        match self {
            Self::IntList => Self::Int,
            Self::FloatList => Self::Float,
            scalar => scalar,
        }
    }

    /// Casts an already-parsed value to this type.
    ///
    /// Lists are cast elementwise, for scalar and list types alike.
    ///
    /// # Errors
    ///
    /// Returns [`CastError`] if the value (or any list element) has no
    /// representation in this type.
    pub fn cast(self, value: &Value) -> Result<Value, CastError> {
        if let Value::Array(items) = value {
            let element = self.element();
            return items
                .iter()
                .map(|item| element.cast(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }

        match self.element() {
            Self::Int => cast_int(value).ok_or_else(|| CastError::new(value, Self::Int)),
            Self::Float => cast_float(value).ok_or_else(|| CastError::new(value, Self::Float)),
            Self::Bool => parse_bool(&literal::render(value))
                .map(Value::Bool)
                .ok_or_else(|| CastError::new(value, Self::Bool)),
            _ => Ok(Value::String(literal::render(value))),
        }
    }

    /// Reads a command-line token as this type.
    ///
    /// List types split the token on `,` and read each trimmed item.
    ///
    /// # Errors
    ///
    /// Returns [`CastError`] if the token (or any item) is not valid.
    pub fn parse_token(self, token: &str) -> Result<Value, CastError> {
        if self.is_list() {
            let element = self.element();
            return token
                .split(',')
                .map(|item| element.parse_token(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }

        let trimmed = token.trim();
        match self {
            Self::Int => trimmed
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| CastError::token(token, self)),
            Self::Float => trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| CastError::token(token, self)),
            Self::Bool => parse_bool(trimmed)
                .map(Value::Bool)
                .ok_or_else(|| CastError::token(token, self)),
            _ => Ok(Value::String(token.to_owned())),
        }
    }
}

/// Reads a boolean token (case-insensitive).
#[must_use]
pub fn parse_bool(token: &str) -> Option<bool> {
    let lowered = token.trim().to_lowercase();
    if TRUE_TOKENS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_TOKENS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn cast_int(value: &Value) -> Option<Value> {
    match value {
        Value::Number(number) if number.is_f64() => {
            let float = number.as_f64()?.trunc();
            #[allow(clippy::cast_precision_loss)] // bounds check only
            let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
            #[allow(clippy::cast_possible_truncation)] // range checked above
            in_range.then(|| Value::from(float as i64))
        }
        Value::Number(_) => Some(value.clone()),
        Value::Bool(flag) => Some(Value::from(i64::from(*flag))),
        Value::String(text) => text.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    }
}

fn cast_float(value: &Value) -> Option<Value> {
    let float = match value {
        Value::Number(number) => number.as_f64()?,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Number::from_f64(float).map(Value::Number)
}
