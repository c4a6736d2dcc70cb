//! In-place resolution of environment references.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::literal;
use crate::types::ValueType;

use super::{EnvSource, Warning};

/// Opening of a reference: `${NAME` and an optional `:TYPE`.
///
/// The rest (`}` or `|DEFAULT}`) is scanned by hand so that defaults can
/// hold nested mapping literals such as `{"a": {"b": 1}}`.
static REFERENCE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?::(?P<type>\w+))?")
        .expect("reference pattern is valid")
});

/// One `${...}` reference and the byte range it spans.
#[derive(Debug, Clone)]
struct Reference<'t> {
    span: Range<usize>,
    name: &'t str,
    type_name: Option<&'t str>,
    default: Option<&'t str>,
}

/// Finds every non-overlapping reference in `text`, left to right.
fn references(text: &str) -> Vec<Reference<'_>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(head) = REFERENCE_HEAD.captures_at(text, pos) {
        let Some(opening) = head.get(0) else { break };
        match close(text, opening.end()) {
            Some((default, end)) => {
                found.push(Reference {
                    span: opening.start()..end,
                    name: head.name("name").map_or("", |m| m.as_str()),
                    type_name: head.name("type").map(|m| m.as_str()),
                    default,
                });
                pos = end;
            }
            // `$` is one byte, so the next search starts on a char boundary.
            None => pos = opening.start() + 1,
        }
    }
    found
}

/// Reads the tail of a reference starting at `from`: either `}` or
/// `|DEFAULT}` with balanced braces in `DEFAULT`.
///
/// Returns the default and the index just past the closing brace.
fn close(text: &str, from: usize) -> Option<(Option<&str>, usize)> {
    let rest = &text[from..];
    if rest.starts_with('}') {
        return Some((None, from + 1));
    }
    let body = rest.strip_prefix('|')?;
    let mut depth = 0usize;
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return Some((Some(&body[..i]), from + 1 + i + 1)),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Substitutes environment references in a configuration tree.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use confargs::env::EnvResolver;
/// use serde_json::json;
///
/// let env = HashMap::from([("PORT".to_string(), "8000".to_string())]);
/// let mut config = json!({"port": "${PORT:int}", "host": "${HOST|localhost}"})
///     .as_object()
///     .cloned()
///     .unwrap();
///
/// let warnings = EnvResolver::new(env).resolve(&mut config);
///
/// assert_eq!(config["port"], json!(8000));
/// assert_eq!(config["host"], json!("localhost"));
/// assert_eq!(warnings.len(), 1); // HOST is unset
/// ```
#[derive(Debug, Clone)]
pub struct EnvResolver<E> {
    env: E,
}

impl<E: EnvSource> EnvResolver<E> {
    /// Creates a resolver reading from `env`.
    #[must_use]
    pub const fn new(env: E) -> Self {
        Self { env }
    }

    /// Resolves every reference in `config`, in place.
    ///
    /// Mappings and lists are walked depth-first; every string leaf is
    /// scanned. Returns the warnings raised, in traversal order. Each
    /// warning is also logged.
    pub fn resolve(&self, config: &mut Map<String, Value>) -> Vec<Warning> {
        let mut warnings = Vec::new();
        for node in config.values_mut() {
            self.resolve_node(node, &mut warnings);
        }
        warnings
    }

    fn resolve_node(&self, node: &mut Value, warnings: &mut Vec<Warning>) {
        match node {
            Value::Object(map) => {
                for child in map.values_mut() {
                    self.resolve_node(child, warnings);
                }
            }
            // Nested lists are leaves.
            Value::Array(items) => {
                for item in items.iter_mut().filter(|item| !item.is_array()) {
                    self.resolve_node(item, warnings);
                }
            }
            Value::String(text) => {
                if let Some(resolved) = self.resolve_text(text, warnings) {
                    *node = resolved;
                }
            }
            _ => {}
        }
    }

    /// Resolves the references in one string leaf.
    ///
    /// Returns `None` when the text holds no reference.
    fn resolve_text(&self, text: &str, warnings: &mut Vec<Warning>) -> Option<Value> {
        let references = references(text);
        match references.as_slice() {
            [] => None,
            [only] if &text[only.span.clone()] == text.trim() => {
                Some(self.resolve_reference(only, warnings))
            }
            _ => {
                let mut spliced = String::with_capacity(text.len());
                let mut last = 0;
                for reference in &references {
                    spliced.push_str(&text[last..reference.span.start]);
                    let value = self.resolve_reference(reference, warnings);
                    spliced.push_str(&literal::render(&value));
                    last = reference.span.end;
                }
                spliced.push_str(&text[last..]);
                Some(Value::String(spliced))
            }
        }
    }

    fn resolve_reference(&self, reference: &Reference<'_>, warnings: &mut Vec<Warning>) -> Value {
        let raw = if let Some(value) = self.env.var(reference.name) {
            value
        } else {
            push(
                warnings,
                Warning::Unset {
                    variable: reference.name.to_owned(),
                    default: reference.default.map(str::to_owned),
                },
            );
            match reference.default {
                Some(default) => default.to_owned(),
                // Already reported as unset.
                None => return Value::String(String::new()),
            }
        };

        if raw.is_empty() {
            push(
                warnings,
                Warning::Empty {
                    variable: reference.name.to_owned(),
                },
            );
            return Value::String(raw);
        }

        let value = literal::parse_or_text(&raw);
        let Some(type_name) = reference.type_name else {
            return value;
        };
        let Some(target) = ValueType::from_name(type_name).filter(|ty| !ty.is_list()) else {
            push(
                warnings,
                Warning::UnknownType {
                    variable: reference.name.to_owned(),
                    type_name: type_name.to_owned(),
                },
            );
            return value;
        };

        match target.cast(&value) {
            Ok(cast) => cast,
            Err(err) => {
                push(
                    warnings,
                    Warning::Cast {
                        variable: reference.name.to_owned(),
                        value: err.value,
                        target: target.name().to_owned(),
                    },
                );
                Self::fall_back(reference, target, value, warnings)
            }
        }
    }

    /// Value used after the primary value failed to cast.
    ///
    /// Without a default the uncast value is kept. With one, the default is
    /// read and cast; if that fails too, the raw default text is the result.
    fn fall_back(
        reference: &Reference<'_>,
        target: ValueType,
        uncast: Value,
        warnings: &mut Vec<Warning>,
    ) -> Value {
        let Some(default) = reference.default else {
            return uncast;
        };

        target
            .cast(&literal::parse_or_text(default))
            .unwrap_or_else(|_| {
                push(
                    warnings,
                    Warning::DefaultCast {
                        variable: reference.name.to_owned(),
                        default: default.to_owned(),
                        target: target.name().to_owned(),
                    },
                );
                Value::String(default.to_owned())
            })
    }
}

fn push(warnings: &mut Vec<Warning>, warning: Warning) {
    tracing::warn!("{warning}");
    warnings.push(warning);
}
