//! Represents a single astronomy-picture-of-the-day entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the record's key within the collection.
pub const DATE_FIELD: &str = "date";

/// Field holding the liked flag.
pub const LIKED_FIELD: &str = "liked";

/// One APOD entry.
///
/// Only `date` and `liked` carry meaning for the service. Every other field
/// (title, url, explanation, ...) is passed through untouched, so the record
/// is kept as a raw JSON object rather than a fixed struct.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// The record key, if present and a string.
    pub fn date(&self) -> Option<&str> {
        self.0.get(DATE_FIELD).and_then(Value::as_str)
    }

    /// Whether `liked` is strictly `true`. Missing or non-boolean values count as not liked.
    pub fn is_liked(&self) -> bool {
        matches!(self.0.get(LIKED_FIELD), Some(Value::Bool(true)))
    }

    /// Truthiness of `liked` as used by the toggle: missing, `null`, `false`,
    /// `0` and `""` are falsy, every other value is truthy.
    pub fn liked_truthy(&self) -> bool {
        match self.0.get(LIKED_FIELD) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    pub fn set_liked(&mut self, liked: bool) {
        self.0.insert(LIKED_FIELD.to_string(), Value::Bool(liked));
    }

    /// Shallow merge: every top-level field in `patch` replaces the existing one,
    /// `date` included.
    pub fn merge(&mut self, patch: Record) {
        for (key, value) in patch.0 {
            self.0.insert(key, value);
        }
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}
