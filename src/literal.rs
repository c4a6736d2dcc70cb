//! Structural literal parsing.
//!
//! Environment values and free-form command-line tokens are read with a
//! deliberately small grammar:
//!
//! - integers and floats (`42`, `-7`, `1_000`, `0.5`, `.5`, `1e3`)
//! - the keywords `True`, `False` and `None`
//! - single- or double-quoted strings with backslash escapes
//! - `[...]` lists, `(...)` tuples (read as lists) and `{key: value}` mappings
//!
//! A bare comma-separated sequence (`1, 2, 3`) is read as a list. Anything
//! outside the grammar is not a literal: [`parse`] returns `None` and
//! callers keep the raw text.
//!
//! [`render`] is the inverse used when a value has to be spliced back into
//! text; its output parses back to the same value.

use serde_json::{Map, Number, Value};

/// Containers nested deeper than this are not literals.
const MAX_DEPTH: usize = 200;

/// Parses `text` as a structural literal.
///
/// Surrounding whitespace is ignored. Returns `None` when the text is not a
/// complete literal.
#[must_use]
pub fn parse(text: &str) -> Option<Value> {
    Cursor::new(text).top_level()
}

/// Parses `text` as a literal, falling back to the text itself.
#[must_use]
pub fn parse_or_text(text: &str) -> Value {
    parse(text).unwrap_or_else(|| Value::String(text.to_owned()))
}

/// Renders a value as text.
///
/// Top-level strings are returned verbatim; every other value is rendered in
/// literal syntax (strings nested in containers are quoted).
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => repr(other),
    }
}

fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_owned(),
        Value::Bool(true) => "True".to_owned(),
        Value::Bool(false) => "False".to_owned(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => quote(text),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", quote(key), repr(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Key text for a parsed mapping key; containers cannot be keys.
fn key_text(key: Value) -> Option<String> {
    match key {
        Value::String(text) => Some(text),
        Value::Array(_) | Value::Object(_) => None,
        scalar => Some(repr(&scalar)),
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Cursor<'a> {
    const fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consumes `expected` (after whitespace) if it is next.
    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.src.len()
    }

    fn top_level(&mut self) -> Option<Value> {
        let first = self.value()?;
        if self.at_end() {
            return Some(first);
        }

        // Bare tuple: `1, 2, 3` or `1,`
        let mut items = vec![first];
        while self.eat(',') {
            if self.at_end() {
                break;
            }
            items.push(self.value()?);
        }
        self.at_end().then_some(Value::Array(items))
    }

    fn value(&mut self) -> Option<Value> {
        self.skip_whitespace();
        match self.peek()? {
            '[' => self.nested(|cursor| cursor.sequence(']').map(Value::Array)),
            '(' => self.nested(Self::tuple),
            '{' => self.nested(Self::mapping),
            '\'' | '"' => self.string().map(Value::String),
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => self.number(),
            c if c.is_alphabetic() || c == '_' => self.keyword(),
            _ => None,
        }
    }

    /// Consumes an opening bracket and parses the container behind it.
    fn nested(&mut self, container: impl FnOnce(&mut Self) -> Option<Value>) -> Option<Value> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.bump();
        self.depth += 1;
        let value = container(self);
        self.depth -= 1;
        value
    }

    /// Items up to `close`; the opening bracket is already consumed.
    fn sequence(&mut self, close: char) -> Option<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Some(items);
            }
            items.push(self.value()?);
            if !self.eat(',') {
                return self.eat(close).then_some(items);
            }
        }
    }

    /// `()` is empty, `(x)` is just `x`, `(x,)` and `(x, y)` are lists.
    fn tuple(&mut self) -> Option<Value> {
        if self.eat(')') {
            return Some(Value::Array(Vec::new()));
        }
        let first = self.value()?;
        if self.eat(')') {
            return Some(first);
        }
        if !self.eat(',') {
            return None;
        }
        let mut items = vec![first];
        items.extend(self.sequence(')')?);
        Some(Value::Array(items))
    }

    fn mapping(&mut self) -> Option<Value> {
        let mut map = Map::new();
        loop {
            if self.eat('}') {
                return Some(Value::Object(map));
            }
            let key = key_text(self.value()?)?;
            if !self.eat(':') {
                return None;
            }
            let value = self.value()?;
            map.insert(key, value);
            if !self.eat(',') {
                return self.eat('}').then_some(Value::Object(map));
            }
        }
    }

    fn string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '0' => out.push('\0'),
                    c @ ('\\' | '\'' | '"') => out.push(c),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                c => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Option<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
        }

        let mut previous = ' ';
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '+' | '-') && matches!(previous, 'e' | 'E');
            if !(c.is_ascii_digit() || matches!(c, '_' | '.' | 'e' | 'E') || exponent_sign) {
                break;
            }
            previous = c;
            self.bump();
        }

        let text = &self.src[start..self.pos];
        if text.starts_with('_') || text.ends_with('_') || text.contains("__") {
            return None;
        }
        let digits = text.replace('_', "");
        if digits.contains(['.', 'e', 'E']) {
            let float = digits.parse::<f64>().ok()?;
            Number::from_f64(float).map(Value::Number)
        } else {
            // `007` is not an integer, but `00` is.
            let unsigned = digits.trim_start_matches(['+', '-']);
            let padded = unsigned.len() > 1 && unsigned.starts_with('0');
            if padded && unsigned.contains(|c: char| c != '0') {
                return None;
            }
            digits.parse::<i64>().ok().map(|int| Value::Number(int.into()))
        }
    }

    fn keyword(&mut self) -> Option<Value> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" => Some(Value::Bool(true)),
            "False" => Some(Value::Bool(false)),
            "None" => Some(Value::Null),
            _ => None,
        }
    }
}
