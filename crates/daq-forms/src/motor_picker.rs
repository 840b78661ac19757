//! Choose one mover out of several, each with its own range.

use tracing::debug;

use crate::devices::MoverRef;
use crate::range::{MoverArgs, MoverRanger};

/// One [`MoverRanger`] per mover with a single active (visible) one.
///
/// Ranges are kept per mover, so switching away and back preserves what the
/// user entered.
#[derive(Debug, Clone, Default)]
pub struct MotorPicker {
    rangers: Vec<MoverRanger>,
    active: Option<usize>,
}

impl MotorPicker {
    /// Build a ranger per mover; the first mover starts active.
    pub fn new(movers: impl IntoIterator<Item = MoverRef>) -> Self {
        let rangers: Vec<_> = movers.into_iter().map(MoverRanger::for_mover).collect();
        let active = if rangers.is_empty() { None } else { Some(0) };
        Self { rangers, active }
    }

    /// Make mover `index` the active one. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.rangers.len() {
            debug!(index, count = self.rangers.len(), "ignoring out-of-range motor selection");
            return;
        }
        if self.active != Some(index) {
            debug!(mover = self.rangers[index].label(), "motor selected");
        }
        self.active = Some(index);
    }

    /// Reset the step count of every ranger.
    pub fn set_steps(&mut self, steps: i64) {
        for ranger in &mut self.rangers {
            ranger.steps_mut().set_value(steps);
        }
    }

    /// Index of the active mover.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Whether ranger `index` is the visible one.
    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Active ranger.
    #[must_use]
    pub fn active(&self) -> Option<&MoverRanger> {
        self.active.and_then(|i| self.rangers.get(i))
    }

    /// Active ranger, mutably.
    pub fn active_mut(&mut self) -> Option<&mut MoverRanger> {
        self.active.and_then(|i| self.rangers.get_mut(i))
    }

    /// All rangers in mover order.
    #[must_use]
    pub fn rangers(&self) -> &[MoverRanger] {
        &self.rangers
    }

    /// Names of the movers, in order, for a selector widget.
    #[must_use]
    pub fn mover_names(&self) -> Vec<&str> {
        self.rangers.iter().map(MoverRanger::label).collect()
    }

    /// Number of movers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rangers.len()
    }

    /// Whether no movers were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rangers.is_empty()
    }

    /// `(mover, start, stop, steps)` from the active ranger only.
    #[must_use]
    pub fn args(&self) -> Option<MoverArgs> {
        self.active()?.args()
    }
}
