//! Non-exclusive detector selection.

use tracing::debug;

use crate::devices::DetectorRef;

/// Group box title used when none is given.
pub const DEFAULT_TITLE: &str = "Detectors";

/// One checkbox per detector; nothing is selected initially.
#[derive(Debug, Clone)]
pub struct DetectorPicker {
    title: String,
    detectors: Vec<DetectorRef>,
    checked: Vec<bool>,
}

impl DetectorPicker {
    /// Build a picker titled "Detectors".
    pub fn new(detectors: impl IntoIterator<Item = DetectorRef>) -> Self {
        Self::with_title(DEFAULT_TITLE, detectors)
    }

    /// Build a picker with a custom title.
    pub fn with_title(
        title: impl Into<String>,
        detectors: impl IntoIterator<Item = DetectorRef>,
    ) -> Self {
        let detectors: Vec<_> = detectors.into_iter().collect();
        let checked = vec![false; detectors.len()];
        Self {
            title: title.into(),
            detectors,
            checked,
        }
    }

    /// Group box title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All detectors with their check state, in input order.
    pub fn entries(&self) -> impl Iterator<Item = (&DetectorRef, bool)> {
        self.detectors.iter().zip(self.checked.iter().copied())
    }

    /// Check state of detector `index`.
    #[must_use]
    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Mutable check state for checkbox widgets.
    pub fn checked_mut(&mut self, index: usize) -> Option<&mut bool> {
        self.checked.get_mut(index)
    }

    /// Set the check state of detector `index`. Out-of-range is ignored.
    pub fn set_checked(&mut self, index: usize, checked: bool) {
        if let Some(slot) = self.checked.get_mut(index) {
            if *slot != checked {
                debug!(detector = self.detectors[index].name(), checked, "detector toggled");
            }
            *slot = checked;
        }
    }

    /// Check the detector with `name`, if present.
    pub fn set_checked_by_name(&mut self, name: &str, checked: bool) {
        if let Some(index) = self.detectors.iter().position(|d| d.name() == name) {
            self.set_checked(index, checked);
        }
    }

    /// Checked detectors, in input order.
    #[must_use]
    pub fn active_detectors(&self) -> Vec<DetectorRef> {
        self.entries()
            .filter(|(_, checked)| *checked)
            .map(|(det, _)| det.clone())
            .collect()
    }

    /// Number of detectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Whether the picker has no detectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}
