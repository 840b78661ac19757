//! Metadata editor for capturing run annotations.
//!
//! A dynamic list of typed key/value entries. New entries get an automatic
//! name `"MD (n)"` and a zero value of their type; the user may rename, edit
//! or remove them at any time. Renames are not checked against siblings, so
//! two entries can end up sharing a key; [`MetadataEditor::collect`] then
//! keeps the later one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FormError;
use crate::params::{ParamValue, Parameters};

/// Metadata attached to a plan invocation.
pub type Metadata = Parameters;

/// Value type of a metadata entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataType {
    /// Free text
    #[serde(alias = "str")]
    String,
    /// Floating point
    Float,
    /// Integer
    Int,
}

impl MetadataType {
    /// All types, in menu order.
    pub const ALL: [MetadataType; 3] = [MetadataType::String, MetadataType::Float, MetadataType::Int];

    /// Zero value for the type.
    #[must_use]
    pub fn zero(&self) -> ParamValue {
        match self {
            MetadataType::String => ParamValue::Text(String::new()),
            MetadataType::Float => ParamValue::Float(0.0),
            MetadataType::Int => ParamValue::Int(0),
        }
    }

    /// Short name used in menus and config.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataType::String => "str",
            MetadataType::Float => "float",
            MetadataType::Int => "int",
        }
    }
}

impl FromStr for MetadataType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "str" | "string" => Ok(MetadataType::String),
            "float" => Ok(MetadataType::Float),
            "int" => Ok(MetadataType::Int),
            other => Err(FormError::UnknownMetadataType(other.to_string())),
        }
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One key/value row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataEntry {
    key: String,
    kind: MetadataType,
    value: ParamValue,
}

impl MetadataEntry {
    /// Entry key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key, mutably (in-place rename from a text editor).
    pub fn key_mut(&mut self) -> &mut String {
        &mut self.key
    }

    /// Value type.
    #[must_use]
    pub fn kind(&self) -> MetadataType {
        self.kind
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    /// Value, mutably. Editors must keep the variant.
    pub fn value_mut(&mut self) -> &mut ParamValue {
        &mut self.value
    }
}

/// Widget model for editing run metadata.
///
/// # Example
///
/// ```
/// use daq_forms::metadata::{MetadataEditor, MetadataType};
/// use daq_forms::params::ParamValue;
///
/// let mut editor = MetadataEditor::new();
/// let idx = editor.add_new(MetadataType::Int);
/// editor.rename(idx, "temperature");
///
/// let md = editor.collect();
/// assert_eq!(md.get("temperature"), Some(&ParamValue::Int(0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetadataEditor {
    entries: Vec<MetadataEntry>,
}

impl MetadataEditor {
    /// Create an empty editor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry of `kind` named `"MD (n)"`, n being the entry count
    /// after insertion. Returns its index.
    pub fn add_new(&mut self, kind: MetadataType) -> usize {
        let key = format!("MD ({})", self.entries.len() + 1);
        debug!(key = %key, kind = %kind, "metadata entry added");
        self.entries.push(MetadataEntry {
            key,
            kind,
            value: kind.zero(),
        });
        self.entries.len() - 1
    }

    /// Append an entry with an explicit key and value.
    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) -> usize {
        let kind = match value {
            ParamValue::Int(_) => MetadataType::Int,
            ParamValue::Float(_) => MetadataType::Float,
            _ => MetadataType::String,
        };
        let value = match value {
            ParamValue::DateTime(dt) => ParamValue::Text(dt.to_string()),
            other => other,
        };
        self.entries.push(MetadataEntry {
            key: key.into(),
            kind,
            value,
        });
        self.entries.len() - 1
    }

    /// Rename entry `index`. Returns false if there is no such entry.
    ///
    /// The new key is not checked against other entries.
    pub fn rename(&mut self, index: usize, key: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.key = key.into();
                true
            }
            None => false,
        }
    }

    /// Replace the value of entry `index`. Values of a different type are
    /// rejected and leave the entry unchanged.
    pub fn set_value(&mut self, index: usize, value: ParamValue) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) if entry.kind.zero().same_type(&value) => {
                entry.value = value;
                true
            }
            _ => false,
        }
    }

    /// Remove entry `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Option<MetadataEntry> {
        if index < self.entries.len() {
            let entry = self.entries.remove(index);
            debug!(key = %entry.key, "metadata entry removed");
            Some(entry)
        } else {
            None
        }
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[MetadataEntry] {
        &self.entries
    }

    /// Entries, mutably, for in-place editing.
    pub fn entries_mut(&mut self) -> &mut [MetadataEntry] {
        &mut self.entries
    }

    /// Build a fresh key → value mapping from the current entries.
    #[must_use]
    pub fn collect(&self) -> Metadata {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
