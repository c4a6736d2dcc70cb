//! Dot-addressable configuration namespace.
//!
//! A [`Namespace`] is an ordered mapping from keys to [`Entry`] values. Any
//! mapping stored in it is promoted into a nested `Namespace`, so every level
//! of the tree supports the same API.
//!
//! # Addressing
//!
//! Keys containing `.` are routed: `ns.get("a.b")` splits on the first dot
//! and looks `b` up in the namespace stored under `a`. Plain and dotted
//! access agree for every nested path:
//!
//! ```
//! use confargs::Namespace;
//! use serde_json::json;
//!
//! let ns = Namespace::try_from(json!({"a": {"b": 1}})).unwrap();
//! assert_eq!(ns["a"]["b"], json!(1));
//! assert_eq!(ns["a.b"], json!(1));
//! assert_eq!(ns.get("a.b"), ns.get_namespace("a").and_then(|a| a.get("b")));
//! ```
//!
//! Absent keys read as `None` from [`Namespace::get`] and as a `null` entry
//! through indexing. [`Namespace::try_get`] is the strict variant that
//! reports routing through a missing or non-namespace segment.

use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Returned by indexing when a key is absent.
static ABSENT: Entry = Entry::Value(Value::Null);

/// Error type for dotted-path routing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    /// A dotted key tried to route through a plain value.
    #[error("Cannot route '{key}' through '{segment}': it holds a value, not a namespace")]
    NotANamespace {
        /// Full dotted key
        key: String,
        /// Path of the segment holding a plain value
        segment: String,
    },

    /// A dotted key tried to route through a segment that is not set.
    #[error("Cannot route '{key}': '{segment}' is not set")]
    Missing {
        /// Full dotted key
        key: String,
        /// Path of the missing segment
        segment: String,
    },
}

impl NamespaceError {
    /// Re-anchors the error paths under `head`.
    fn prefixed(self, head: &str) -> Self {
        match self {
            Self::NotANamespace { key, segment } => Self::NotANamespace {
                key: format!("{head}.{key}"),
                segment: format!("{head}.{segment}"),
            },
            Self::Missing { key, segment } => Self::Missing {
                key: format!("{head}.{key}"),
                segment: format!("{head}.{segment}"),
            },
        }
    }
}

/// A value stored in a [`Namespace`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A scalar, list or `null`.
    Value(Value),
    /// A nested namespace.
    Namespace(Namespace),
}

impl Entry {
    /// Returns the nested namespace, if this entry is one.
    #[must_use]
    pub const fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            Self::Namespace(ns) => Some(ns),
            Self::Value(_) => None,
        }
    }

    /// Returns the plain value, if this entry is not a namespace.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Namespace(_) => None,
        }
    }

    /// Returns true for nested namespaces.
    #[must_use]
    pub const fn is_namespace(&self) -> bool {
        matches!(self, Self::Namespace(_))
    }

    /// Returns true for the `null` value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_i64)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    /// Looks up `key` in the nested namespace; `None` for plain values.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_namespace().and_then(|ns| ns.get(key))
    }

    /// Converts the entry back into a plain value tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Namespace(ns) => ns.to_value(),
        }
    }
}

impl From<Value> for Entry {
    /// Mappings are promoted to namespaces, recursively. Their keys are
    /// stored verbatim.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Namespace(Namespace::from_map_verbatim(map)),
            other => Self::Value(other),
        }
    }
}

impl From<Namespace> for Entry {
    fn from(ns: Namespace) -> Self {
        Self::Namespace(ns)
    }
}

impl PartialEq<Value> for Entry {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Value(value), other) => value == other,
            (Self::Namespace(ns), Value::Object(map)) => ns == map,
            (Self::Namespace(_), _) => false,
        }
    }
}

impl PartialEq<Entry> for Value {
    fn eq(&self, other: &Entry) -> bool {
        other == self
    }
}

impl Index<&str> for Entry {
    type Output = Self;

    /// Routes into the nested namespace; plain values yield a `null` entry.
    ///
    /// [`Namespace::try_get`] reports such routes as errors.
    fn index(&self, key: &str) -> &Self {
        self.get(key).unwrap_or(&ABSENT)
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Namespace(ns) => ns.serialize(serializer),
        }
    }
}

/// Ordered, dot-addressable mapping of configuration entries.
///
/// Equality ignores key order and holds structurally against plain
/// `serde_json` mappings.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: Vec<(String, Entry)>,
}

impl Namespace {
    /// Creates an empty namespace.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a namespace from a mapping, routing dotted keys.
    ///
    /// `{"a.b": 1}` produces the same namespace as `{"a": {"b": 1}}`.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError::NotANamespace`] if a dotted key routes
    /// through a key that already holds a plain value.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, NamespaceError> {
        let mut ns = Self::new();
        for (key, value) in map {
            ns.set(&key, value)?;
        }
        Ok(ns)
    }

    fn from_map_verbatim(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, Entry::from(value)))
                .collect(),
        }
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find_map(|(k, entry)| (k == key).then_some(entry))
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find_map(|(k, entry)| (k == key).then_some(entry))
    }

    /// Looks up `key`, routing dotted keys into nested namespaces.
    ///
    /// A key stored verbatim (dots included) is matched before routing.
    /// Returns `None` when the key, or any segment on the way, is absent or
    /// not a namespace.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.try_get(key).ok().flatten()
    }

    /// Strict variant of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError`] when a dotted key routes through a
    /// segment that is missing or holds a plain value. An absent final
    /// segment is `Ok(None)`.
    pub fn try_get(&self, key: &str) -> Result<Option<&Entry>, NamespaceError> {
        if let Some(entry) = self.entry(key) {
            return Ok(Some(entry));
        }
        let Some((head, rest)) = key.split_once('.') else {
            return Ok(None);
        };
        match self.entry(head) {
            Some(Entry::Namespace(nested)) => {
                nested.try_get(rest).map_err(|err| err.prefixed(head))
            }
            Some(Entry::Value(_)) => Err(NamespaceError::NotANamespace {
                key: key.to_owned(),
                segment: head.to_owned(),
            }),
            None => Err(NamespaceError::Missing {
                key: key.to_owned(),
                segment: head.to_owned(),
            }),
        }
    }

    /// Looks up a plain value.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(Entry::as_value)
    }

    /// Looks up a nested namespace.
    #[must_use]
    pub fn get_namespace(&self, key: &str) -> Option<&Self> {
        self.get(key).and_then(Entry::as_namespace)
    }

    /// Returns true if `key` resolves to an entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`.
    ///
    /// Mappings are promoted to namespaces. A dotted key materializes empty
    /// namespaces for missing segments, then stores the value in the
    /// innermost one.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError::NotANamespace`] if a segment of a dotted
    /// key already holds a plain value. The namespace is left unchanged.
    pub fn set(&mut self, key: &str, value: impl Into<Entry>) -> Result<(), NamespaceError> {
        let entry = value.into();
        let Some((head, rest)) = key.split_once('.') else {
            self.insert(key, entry);
            return Ok(());
        };

        if self.entry(head).is_none() {
            self.insert(head, Entry::Namespace(Self::new()));
        }
        match self.entry_mut(head) {
            Some(Entry::Namespace(nested)) => {
                nested.set(rest, entry).map_err(|err| err.prefixed(head))
            }
            _ => Err(NamespaceError::NotANamespace {
                key: key.to_owned(),
                segment: head.to_owned(),
            }),
        }
    }

    /// Stores `entry` under the literal `key`, keeping the position of an
    /// existing entry.
    fn insert(&mut self, key: &str, entry: Entry) {
        match self.entry_mut(key) {
            Some(slot) => *slot = entry,
            None => self.entries.push((key.to_owned(), entry)),
        }
    }

    /// Removes and returns the entry under `key`, routing dotted keys.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        if let Some(index) = self.entries.iter().position(|(k, _)| k == key) {
            return Some(self.entries.remove(index).1);
        }
        let (head, rest) = key.split_once('.')?;
        match self.entry_mut(head)? {
            Entry::Namespace(nested) => nested.remove(rest),
            Entry::Value(_) => None,
        }
    }

    /// Converts the namespace back into a plain mapping.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.to_value()))
            .collect()
    }

    /// Converts the namespace back into a plain value tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }
}

impl TryFrom<Map<String, Value>> for Namespace {
    type Error = NamespaceError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_map(map)
    }
}

impl TryFrom<Value> for Namespace {
    type Error = NamespaceError;

    /// Non-mapping values become a namespace holding nothing.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Ok(Self::new()),
        }
    }
}

impl From<Namespace> for Value {
    fn from(ns: Namespace) -> Self {
        ns.to_value()
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, entry)| other.entry(key) == Some(entry))
    }
}

impl PartialEq<Map<String, Value>> for Namespace {
    fn eq(&self, other: &Map<String, Value>) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, entry)| other.get(key).is_some_and(|value| entry == value))
    }
}

impl PartialEq<Value> for Namespace {
    fn eq(&self, other: &Value) -> bool {
        other.as_object().is_some_and(|map| self == map)
    }
}

impl PartialEq<Namespace> for Value {
    fn eq(&self, other: &Namespace) -> bool {
        other == self
    }
}

impl Index<&str> for Namespace {
    type Output = Entry;

    /// Absent keys yield a `null` entry, like `serde_json::Value` indexing.
    ///
    /// So does a dotted key routed through a plain value (`"a.b"` where `a`
    /// is a scalar). Use [`Namespace::try_get`] to get a routing error
    /// instead.
    fn index(&self, key: &str) -> &Entry {
        self.get(key).unwrap_or(&ABSENT)
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}
