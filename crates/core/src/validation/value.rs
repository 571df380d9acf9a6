//! Field value model.
//!
//! Form controls produce text (inputs, selects), numbers (numeric inputs),
//! booleans (checkboxes), or nothing at all. [`FieldValue`] captures exactly
//! those kinds so the evaluator can match on them exhaustively.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A raw input value as submitted by a form control.
///
/// Deserializes untagged from JSON: `null` becomes [`FieldValue::Empty`],
/// strings, numbers and booleans map to their variants. Arrays and objects
/// are not field values and fail to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// A submitted form: field name to raw value.
pub type Record = BTreeMap<String, FieldValue>;

impl FieldValue {
    /// `true` for an absent value or an empty string.
    ///
    /// Whitespace-only strings are not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) | FieldValue::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}
