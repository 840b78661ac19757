//! Parameter values and the merge primitive shared by every composite widget.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::field::Field;

/// A typed scalar contributed by a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Free text
    Text(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Local date and time (no timezone)
    DateTime(NaiveDateTime),
}

impl ParamValue {
    /// Numeric view of the value, if it has one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer view of the value, if it is an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view of the value, if it is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true when both values carry the same variant.
    #[must_use]
    pub fn same_type(&self, other: &ParamValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(dt: NaiveDateTime) -> Self {
        ParamValue::DateTime(dt)
    }
}

/// Name-keyed parameter mapping produced by fields and composites.
pub type Parameters = HashMap<String, ParamValue>;

/// Merge the contributions of every active field.
///
/// Inactive fields contribute nothing. When two active fields contribute the
/// same key, the one visited later wins.
pub fn merge_parameters<'a, I>(fields: I) -> Parameters
where
    I: IntoIterator<Item = &'a dyn Field>,
{
    let mut merged = Parameters::new();
    for field in fields {
        if field.is_active() {
            merged.extend(field.parameters());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FloatSpin, IntSpin, TextField};

    #[test]
    fn test_merge_skips_inactive_fields() {
        let mut start = FloatSpin::new("start");
        start.set_value(1.5);
        let mut steps = IntSpin::new("steps");
        steps.set_value(4);
        steps.set_enabled(false);
        let sample = TextField::with_text("sample", "Si-111");

        let merged = merge_parameters([&start as &dyn Field, &steps, &sample]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("start"), Some(&ParamValue::Float(1.5)));
        assert_eq!(
            merged.get("sample"),
            Some(&ParamValue::Text("Si-111".to_string()))
        );
        assert!(!merged.contains_key("steps"));
    }

    #[test]
    fn test_merge_later_field_wins() {
        let first = TextField::with_text("operator", "first");
        let second = TextField::with_text("operator", "second");

        let merged = merge_parameters([&first as &dyn Field, &second]);
        assert_eq!(
            merged.get("operator"),
            Some(&ParamValue::Text("second".to_string()))
        );
    }

    #[test]
    fn test_merge_empty() {
        let merged = merge_parameters(std::iter::empty::<&dyn Field>());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&ParamValue::Int(3)).unwrap();
        assert_eq!(json, "3");
        let json = serde_json::to_string(&ParamValue::Text("a".into())).unwrap();
        assert_eq!(json, "\"a\"");
    }
}
