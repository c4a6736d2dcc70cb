//! Non-fatal diagnostics raised while resolving references.

use std::fmt;

/// Category of a [`Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The variable was unset or resolved to empty text.
    Resolution,
    /// A value could not be cast to the declared type.
    Casting,
}

/// A recoverable issue met while resolving one reference.
///
/// Resolution continues with the fallback value described by each variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The variable is not set; `default` (or empty text) is used instead.
    Unset {
        /// Referenced variable
        variable: String,
        /// Default text from the reference, if any
        default: Option<String>,
    },

    /// The resolved text is empty and is kept as-is, uncast.
    Empty {
        /// Referenced variable
        variable: String,
    },

    /// The value could not be cast.
    ///
    /// Falls back to the default when one is given, otherwise to the
    /// uncast value.
    Cast {
        /// Referenced variable
        variable: String,
        /// Rendered value that failed to cast
        value: String,
        /// Declared type name
        target: String,
    },

    /// The default could not be cast either; its raw text is used.
    DefaultCast {
        /// Referenced variable
        variable: String,
        /// Raw default text
        default: String,
        /// Declared type name
        target: String,
    },

    /// The declared type is not supported; the uncast value is used.
    UnknownType {
        /// Referenced variable
        variable: String,
        /// Declared type name
        type_name: String,
    },
}

impl Warning {
    /// Returns the category of this warning.
    #[must_use]
    pub const fn kind(&self) -> WarningKind {
        match self {
            Self::Unset { .. } | Self::Empty { .. } => WarningKind::Resolution,
            Self::Cast { .. } | Self::DefaultCast { .. } | Self::UnknownType { .. } => {
                WarningKind::Casting
            }
        }
    }

    /// Referenced variable the warning is about.
    #[must_use]
    pub fn variable(&self) -> &str {
        match self {
            Self::Unset { variable, .. }
            | Self::Empty { variable }
            | Self::Cast { variable, .. }
            | Self::DefaultCast { variable, .. }
            | Self::UnknownType { variable, .. } => variable,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset {
                variable,
                default: Some(default),
            } => write!(f, "${{{variable}}} is not set, using default '{default}'"),
            Self::Unset {
                variable,
                default: None,
            } => write!(f, "${{{variable}}} is not set and has no default, using empty text"),
            Self::Empty { variable } => write!(f, "${{{variable}}} resolved to empty text"),
            Self::Cast {
                variable,
                value,
                target,
            } => write!(f, "${{{variable}}}: cannot cast '{value}' to {target}"),
            Self::DefaultCast {
                variable,
                default,
                target,
            } => write!(
                f,
                "${{{variable}}}: cannot cast default '{default}' to {target} either, keeping it as text"
            ),
            Self::UnknownType {
                variable,
                type_name,
            } => write!(f, "${{{variable}}}: unknown type '{type_name}', value left uncast"),
        }
    }
}
