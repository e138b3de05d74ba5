//! Raw record representation shared by all three decoders.
//!
//! Attendance payloads arrive as loosely-typed key/value data: JSON objects
//! mix strings, numbers and booleans; XML attributes and text lines are
//! always strings. [`RawRecord`] models one record candidate as a map from
//! field name to a small tagged union, so that every coercion decision lives
//! in the normalizer instead of being scattered across decoders.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One loosely-typed field value from a device payload.
///
/// Absence is modeled as non-presence in the [`RawRecord`] map, not as a
/// variant.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    /// Whether the value counts as present for alias resolution.
    ///
    /// Only an empty string is treated as absent; numeric zero and `false`
    /// are real values (a verify-method code of 0 means password).
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Number(_) | FieldValue::Flag(_) => true,
        }
    }

    /// Render the value as a string, the way a device would have sent it.
    ///
    /// Integer-valued numbers render without a decimal point so that numeric
    /// user IDs and epoch timestamps survive the round trip through JSON
    /// numbers.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            FieldValue::Flag(b) => b.to_string(),
        }
    }

    /// Coerce to an integer code, falling back to `default`.
    ///
    /// Accepts non-negative all-digit strings and integer-valued numbers;
    /// anything else (floats, signed strings, booleans, free text) takes the
    /// default rather than failing the record.
    #[must_use]
    pub fn coerce_code(&self, default: i64) -> i64 {
        match self {
            FieldValue::Text(s) => {
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                    s.parse().unwrap_or(default)
                } else {
                    default
                }
            }
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9e15 {
                    *n as i64
                } else {
                    default
                }
            }
            FieldValue::Flag(_) => default,
        }
    }

    /// Passthrough rendering for optional extras (temperature, mask status).
    ///
    /// Returns `None` for empty strings, numeric zero and `false`, matching
    /// the device convention that a zero reading means "not reported".
    #[must_use]
    pub fn non_empty_string(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) if s.is_empty() => None,
            FieldValue::Number(n) if *n == 0.0 => None,
            FieldValue::Flag(false) => None,
            other => Some(other.to_display_string()),
        }
    }
}

/// One raw record candidate: field-name synonyms mapped to loose values.
///
/// Produced by a decoder, consumed immediately by the normalizer, never
/// stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl RawRecord {
    #[must_use]
    pub fn new() -> Self {
        RawRecord::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    /// Insert a text field; convenience for the positional text decoder.
    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, FieldValue::Text(value.into()));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Resolve a canonical field through its ordered alias list.
    ///
    /// Returns the first alias whose value is present per
    /// [`FieldValue::is_present`]; a key mapped to an empty string falls
    /// through to the next alias exactly as a missing key does.
    #[must_use]
    pub fn first_of(&self, aliases: &[&str]) -> Option<&FieldValue> {
        aliases
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .find(|value| value.is_present())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a raw record from a JSON object.
    ///
    /// Scalar members become fields; nulls, arrays and nested objects carry
    /// no per-record meaning for any known device and are skipped.
    #[must_use]
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let mut record = RawRecord::new();
        for (key, value) in object {
            match value {
                Value::String(s) => record.insert(key.clone(), FieldValue::Text(s.clone())),
                Value::Number(n) => {
                    if let Some(f) = n.as_f64() {
                        record.insert(key.clone(), FieldValue::Number(f));
                    }
                }
                Value::Bool(b) => record.insert(key.clone(), FieldValue::Flag(*b)),
                Value::Null | Value::Array(_) | Value::Object(_) => {}
            }
        }
        record
    }
}
