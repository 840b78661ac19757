//! Labelled fields with an enable checkbox.
//!
//! An [`OptionalField`] decorates any [`Field`] with a toggle. Required
//! fields keep the toggle locked on; optional fields start inactive and only
//! contribute once the user switches them on. The toggle drives an explicit
//! two-state machine whose transitions enable or disable the inner editor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FormError;
use crate::field::Field;
use crate::params::Parameters;

/// How the label is placed relative to its editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LabelLayout {
    /// Checkbox, label and editor on one row
    #[default]
    Horizontal,
    /// Label stacked above the editor
    Vertical,
}

impl LabelLayout {
    /// Config-file spelling of the layout.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelLayout::Horizontal => "horizontal",
            LabelLayout::Vertical => "vertical",
        }
    }
}

impl FromStr for LabelLayout {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(LabelLayout::Horizontal),
            "vertical" | "v" => Ok(LabelLayout::Vertical),
            _ => Err(FormError::InvalidLabelLayout(s.to_string())),
        }
    }
}

impl TryFrom<String> for LabelLayout {
    type Error = FormError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LabelLayout> for String {
    fn from(layout: LabelLayout) -> Self {
        layout.as_str().to_string()
    }
}

impl fmt::Display for LabelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Toggle state of an optional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Excluded from collection; editor inert
    Inactive,
    /// Included in collection; editor interactive
    Active,
}

/// A field wrapped with a label and an enable checkbox.
#[derive(Debug, Clone)]
pub struct OptionalField<F> {
    label: String,
    required: bool,
    layout: LabelLayout,
    state: FieldState,
    inner: F,
}

impl<F: Field> OptionalField<F> {
    /// Wrap `inner`. Required fields start (and stay) active; optional ones
    /// start inactive with the inner field disabled.
    pub fn new(label: impl Into<String>, required: bool, mut inner: F) -> Self {
        let state = if required {
            FieldState::Active
        } else {
            FieldState::Inactive
        };
        inner.set_enabled(state == FieldState::Active);
        Self {
            label: label.into(),
            required,
            layout: LabelLayout::default(),
            state,
            inner,
        }
    }

    /// Shorthand for a required field.
    pub fn required(label: impl Into<String>, inner: F) -> Self {
        Self::new(label, true, inner)
    }

    /// Shorthand for an optional field.
    pub fn optional(label: impl Into<String>, inner: F) -> Self {
        Self::new(label, false, inner)
    }

    /// Wrap `inner` with a layout given by name, rejecting unknown layouts.
    pub fn with_layout_name(
        label: impl Into<String>,
        required: bool,
        layout: &str,
        inner: F,
    ) -> crate::Result<Self> {
        let layout = layout.parse()?;
        Ok(Self::new(label, required, inner).with_layout(layout))
    }

    /// Builder-style layout override.
    #[must_use]
    pub fn with_layout(mut self, layout: LabelLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Change the label placement.
    pub fn set_layout(&mut self, layout: LabelLayout) {
        self.layout = layout;
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label placement.
    #[must_use]
    pub fn layout(&self) -> LabelLayout {
        self.layout
    }

    /// Whether the toggle is locked on.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Current toggle state.
    #[must_use]
    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Whether the checkbox is ticked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.state == FieldState::Active
    }

    /// Whether the user may change the checkbox.
    #[must_use]
    pub fn is_toggle_enabled(&self) -> bool {
        !self.required
    }

    /// Drive the toggle. Ignored for required fields.
    pub fn set_checked(&mut self, checked: bool) {
        if self.required {
            return;
        }
        let next = if checked {
            FieldState::Active
        } else {
            FieldState::Inactive
        };
        if next == self.state {
            return;
        }
        debug!(label = %self.label, state = ?next, "optional field toggled");
        self.state = next;
        self.inner.set_enabled(next == FieldState::Active);
    }

    /// Flip the toggle.
    pub fn toggle(&mut self) {
        self.set_checked(!self.is_checked());
    }

    /// Wrapped field.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Wrapped field, mutably (value edits).
    pub fn inner_mut(&mut self) -> &mut F {
        &mut self.inner
    }
}

impl<F: Field> Field for OptionalField<F> {
    fn parameters(&self) -> Parameters {
        self.inner.parameters()
    }

    fn is_active(&self) -> bool {
        self.required || self.state == FieldState::Active
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.set_checked(enabled);
    }
}
