//! Environment variable interpolation.
//!
//! This module provides:
//! - Environment access behind a trait ([`EnvSource`], [`ProcessEnv`])
//! - In-place resolution of `${NAME:TYPE|DEFAULT}` references ([`EnvResolver`])
//! - Non-fatal diagnostics collected during resolution ([`Warning`])
//!
//! # Reference Syntax
//!
//! | Form | Meaning |
//! |------|---------|
//! | `${NAME}` | value of `NAME`, read as a literal when possible |
//! | `${NAME:TYPE}` | same, then cast to `int`, `float`, `str` or `bool` |
//! | `${NAME\|DEFAULT}` | `DEFAULT` when `NAME` is unset |
//! | `${NAME:TYPE\|DEFAULT}` | both; `DEFAULT` is also the fallback for a failed cast |
//!
//! A string that is exactly one reference is replaced by the typed result.
//! References embedded in surrounding text are spliced in as text.

mod resolver;
mod source;
mod warning;


pub use resolver::EnvResolver;
pub use source::{EnvSource, ProcessEnv};
pub use warning::{Warning, WarningKind};
