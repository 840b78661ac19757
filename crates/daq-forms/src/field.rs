//! Atomic value editors.
//!
//! Every editor implements [`Field`]: it reports whether it is currently
//! active and which name-keyed values it contributes. The numeric spinners
//! clamp to their declared range the way a spin box does, so out-of-range
//! values never reach a collected parameter map.

use chrono::{Local, NaiveDateTime};

use crate::params::{ParamValue, Parameters};

/// Default symmetric bound of the numeric spinners (2^16).
pub const SPIN_LIMIT: i64 = 1 << 16;

/// Decimal places shown (and kept) by a float spinner unless configured.
pub const DEFAULT_DECIMALS: u32 = 3;

/// Most decimals a float spinner keeps (f64 precision).
pub const MAX_DECIMALS: u32 = 15;

/// Capability contract for anything that contributes parameters.
pub trait Field {
    /// Name-keyed values contributed by this field.
    fn parameters(&self) -> Parameters;

    /// Whether the field is currently eligible for collection.
    fn is_active(&self) -> bool;

    /// Enable or disable interaction with the field.
    fn set_enabled(&mut self, enabled: bool);
}

/// Single-line text editor.
#[derive(Debug, Clone)]
pub struct TextField {
    name: String,
    text: String,
    enabled: bool,
}

impl TextField {
    /// Create an empty text field.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_text(name, "")
    }

    /// Create a text field with initial contents.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            enabled: true,
        }
    }

    /// Field name used as the parameter key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Mutable access for text editors.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Apply a default, ignoring `None`.
    pub fn set_default(&mut self, value: Option<&str>) {
        if let Some(v) = value {
            self.set_text(v);
        }
    }

    /// Whether the field accepts input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Field for TextField {
    fn parameters(&self) -> Parameters {
        Parameters::from([(self.name.clone(), ParamValue::Text(self.text.clone()))])
    }

    fn is_active(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Integer spin box.
#[derive(Debug, Clone)]
pub struct IntSpin {
    name: String,
    value: i64,
    min: i64,
    max: i64,
    suffix: Option<String>,
    enabled: bool,
}

impl IntSpin {
    /// Create a spinner at zero with the default [-2^16, 2^16] range.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0,
            min: -SPIN_LIMIT,
            max: SPIN_LIMIT,
            suffix: None,
            enabled: true,
        }
    }

    /// Field name used as the parameter key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Set the value, clamped into range.
    pub fn set_value(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Apply a default, ignoring `None`.
    pub fn set_default(&mut self, value: Option<i64>) {
        if let Some(v) = value {
            self.set_value(v);
        }
    }

    /// Set both bounds. An inverted pair collapses to `min`.
    pub fn set_range(&mut self, min: i64, max: i64) {
        self.min = min;
        self.max = max.max(min);
        self.set_value(self.value);
    }

    /// Raise the lower bound only.
    pub fn set_minimum(&mut self, min: i64) {
        self.set_range(min, self.max.max(min));
    }

    /// Current `(min, max)` bounds.
    #[must_use]
    pub fn range(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    /// Unit suffix shown after the value.
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Set the unit suffix.
    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix = Some(suffix.into());
    }

    /// Whether the field accepts input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Field for IntSpin {
    fn parameters(&self) -> Parameters {
        Parameters::from([(self.name.clone(), ParamValue::Int(self.value))])
    }

    fn is_active(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Floating point spin box with fixed decimal precision.
#[derive(Debug, Clone)]
pub struct FloatSpin {
    name: String,
    value: f64,
    min: f64,
    max: f64,
    decimals: u32,
    suffix: Option<String>,
    enabled: bool,
}

impl FloatSpin {
    /// Create a spinner at zero with the default range and three decimals.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            min: -(SPIN_LIMIT as f64),
            max: SPIN_LIMIT as f64,
            decimals: DEFAULT_DECIMALS,
            suffix: None,
            enabled: true,
        }
    }

    /// Field name used as the parameter key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set the value, rounded to the configured decimals and clamped.
    pub fn set_value(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.value = self.round(value).clamp(self.min, self.max);
    }

    /// Apply a default, ignoring `None`.
    pub fn set_default(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.set_value(v);
        }
    }

    /// Set both bounds. An inverted pair collapses to `min`.
    pub fn set_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max.max(min);
        self.set_value(self.value);
    }

    /// Current `(min, max)` bounds.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Number of decimals kept.
    #[must_use]
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Change precision, capped at [`MAX_DECIMALS`]; the current value is
    /// re-rounded.
    pub fn set_decimals(&mut self, decimals: u32) {
        self.decimals = decimals.min(MAX_DECIMALS);
        self.set_value(self.value);
    }

    /// Unit suffix shown after the value.
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Set the unit suffix.
    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix = Some(suffix.into());
    }

    /// Remove the unit suffix.
    pub fn clear_suffix(&mut self) {
        self.suffix = None;
    }

    /// Whether the field accepts input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        (value * scale).round() / scale
    }
}

impl Field for FloatSpin {
    fn parameters(&self) -> Parameters {
        Parameters::from([(self.name.clone(), ParamValue::Float(self.value))])
    }

    fn is_active(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Date/time editor, initialised to the current local time.
#[derive(Debug, Clone)]
pub struct DateTimeField {
    name: String,
    value: NaiveDateTime,
    enabled: bool,
}

impl DateTimeField {
    /// Create a field holding "now".
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Local::now().naive_local(),
            enabled: true,
        }
    }

    /// Field name used as the parameter key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> NaiveDateTime {
        self.value
    }

    /// Replace the value.
    pub fn set_value(&mut self, value: NaiveDateTime) {
        self.value = value;
    }

    /// Apply a default, ignoring `None`.
    pub fn set_default(&mut self, value: Option<NaiveDateTime>) {
        if let Some(v) = value {
            self.value = v;
        }
    }

    /// Whether the field accepts input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Field for DateTimeField {
    fn parameters(&self) -> Parameters {
        Parameters::from([(self.name.clone(), ParamValue::DateTime(self.value))])
    }

    fn is_active(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
