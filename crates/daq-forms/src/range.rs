//! Start/stop/steps selector bound to one mover.

use tracing::debug;

use crate::devices::MoverRef;
use crate::field::{Field, FloatSpin, IntSpin, SPIN_LIMIT};
use crate::params::{merge_parameters, Parameters};

/// Default number of steps for a new range.
pub const DEFAULT_STEPS: i64 = 10;

/// Positional arguments for a one-axis plan: `(mover, start, stop, steps)`.
pub type MoverArgs = (MoverRef, f64, f64, i64);

/// Names used as parameter keys by a [`MoverRanger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeNames {
    /// Key for the start position
    pub start: String,
    /// Key for the stop position
    pub stop: String,
    /// Key for the number of steps
    pub steps: String,
}

impl Default for RangeNames {
    fn default() -> Self {
        Self {
            start: "start".to_string(),
            stop: "stop".to_string(),
            steps: "steps".to_string(),
        }
    }
}

/// Range editor for a single mover.
///
/// Limits reported by the mover constrain both position editors, except for
/// the `(0, 0)` "no limits" convention. A reported unit is appended to both
/// editors as a suffix.
#[derive(Debug, Clone)]
pub struct MoverRanger {
    name: String,
    mover: Option<MoverRef>,
    start: FloatSpin,
    stop: FloatSpin,
    steps: IntSpin,
    enabled: bool,
}

impl MoverRanger {
    /// Create an unbound ranger with default parameter names.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_names(name, RangeNames::default(), DEFAULT_STEPS)
    }

    /// Create a ranger bound to `mover`.
    pub fn for_mover(mover: MoverRef) -> Self {
        let mut ranger = Self::new(mover.name().to_string());
        ranger.set_mover(mover);
        ranger
    }

    /// Create an unbound ranger with custom parameter names and initial steps.
    pub fn with_names(name: impl Into<String>, names: RangeNames, steps: i64) -> Self {
        let mut steps_spin = IntSpin::new(names.steps);
        steps_spin.set_minimum(1);
        steps_spin.set_value(steps);
        Self {
            name: name.into(),
            mover: None,
            start: FloatSpin::new(names.start),
            stop: FloatSpin::new(names.stop),
            steps: steps_spin,
            enabled: true,
        }
    }

    /// Bind to a mover, applying its limits and units.
    pub fn set_mover(&mut self, mover: MoverRef) {
        for spin in [&mut self.start, &mut self.stop] {
            spin.set_range(-(SPIN_LIMIT as f64), SPIN_LIMIT as f64);
            spin.clear_suffix();
        }
        if let Some(limits) = mover.limits().and_then(|l| l.bounded()) {
            debug!(mover = mover.name(), low = limits.low, high = limits.high, "applying mover limits");
            self.start.set_range(limits.low, limits.high);
            self.stop.set_range(limits.low, limits.high);
        }
        if let Some(egu) = mover.egu() {
            self.start.set_suffix(format!(" {}", egu));
            self.stop.set_suffix(format!(" {}", egu));
        }
        self.mover = Some(mover);
    }

    /// Widget name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label text: the bound mover's name, empty when unbound.
    #[must_use]
    pub fn label(&self) -> &str {
        self.mover.as_ref().map(|m| m.name()).unwrap_or("")
    }

    /// Bound mover.
    #[must_use]
    pub fn mover(&self) -> Option<&MoverRef> {
        self.mover.as_ref()
    }

    /// Start editor.
    pub fn start(&self) -> &FloatSpin {
        &self.start
    }

    /// Start editor, mutably.
    pub fn start_mut(&mut self) -> &mut FloatSpin {
        &mut self.start
    }

    /// Stop editor.
    pub fn stop(&self) -> &FloatSpin {
        &self.stop
    }

    /// Stop editor, mutably.
    pub fn stop_mut(&mut self) -> &mut FloatSpin {
        &mut self.stop
    }

    /// Steps editor.
    pub fn steps(&self) -> &IntSpin {
        &self.steps
    }

    /// Steps editor, mutably.
    pub fn steps_mut(&mut self) -> &mut IntSpin {
        &mut self.steps
    }

    /// Set start, stop and steps in one call (each clamped).
    pub fn set_range(&mut self, start: f64, stop: f64, steps: i64) {
        self.start.set_value(start);
        self.stop.set_value(stop);
        self.steps.set_value(steps);
    }

    /// `(mover, start, stop, steps)` for direct plan invocation, or `None`
    /// while no mover is bound.
    #[must_use]
    pub fn args(&self) -> Option<MoverArgs> {
        let mover = self.mover.clone()?;
        Some((
            mover,
            self.start.value(),
            self.stop.value(),
            self.steps.value(),
        ))
    }
}

impl Field for MoverRanger {
    fn parameters(&self) -> Parameters {
        merge_parameters([
            &self.start as &dyn Field,
            &self.stop as &dyn Field,
            &self.steps as &dyn Field,
        ])
    }

    fn is_active(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::params::ParamValue;
    use crate::sim::SimMover;

    #[test]
    fn test_zero_limits_do_not_constrain() {
        let mut ranger = MoverRanger::for_mover(Arc::new(SimMover::new("m1").with_limits(0.0, 0.0)));
        ranger.set_range(-500.0, 500.0, 5);

        let (_, start, stop, steps) = ranger.args().unwrap();
        assert_eq!(start, -500.0);
        assert_eq!(stop, 500.0);
        assert_eq!(steps, 5);
    }

    #[test]
    fn test_limits_clamp_start_and_stop() {
        let mut ranger =
            MoverRanger::for_mover(Arc::new(SimMover::new("m1").with_limits(-10.0, 10.0)));
        ranger.set_range(-20.0, 20.0, 3);

        assert_eq!(ranger.start().value(), -10.0);
        assert_eq!(ranger.stop().value(), 10.0);
        assert_eq!(ranger.start().range(), (-10.0, 10.0));
        assert_eq!(ranger.stop().range(), (-10.0, 10.0));
    }

    #[test]
    fn test_rebinding_drops_previous_limits_and_units() {
        let limited = Arc::new(SimMover::new("a").with_limits(-1.0, 1.0).with_egu("deg"));
        let mut ranger = MoverRanger::for_mover(limited);

        ranger.set_mover(Arc::new(SimMover::new("b")));
        ranger.set_range(-50.0, 50.0, 2);

        assert_eq!(ranger.start().value(), -50.0);
        assert_eq!(ranger.stop().value(), 50.0);
        assert_eq!(ranger.start().range(), (-(SPIN_LIMIT as f64), SPIN_LIMIT as f64));
        assert_eq!(ranger.start().suffix(), None);
        assert_eq!(ranger.stop().suffix(), None);
        assert_eq!(ranger.label(), "b");
    }

    #[test]
    fn test_egu_suffix() {
        let ranger = MoverRanger::for_mover(Arc::new(SimMover::new("th").with_egu("deg")));
        assert_eq!(ranger.start().suffix(), Some(" deg"));
        assert_eq!(ranger.stop().suffix(), Some(" deg"));

        let plain = MoverRanger::for_mover(Arc::new(SimMover::new("x")));
        assert_eq!(plain.start().suffix(), None);
    }

    #[test]
    fn test_steps_minimum_and_default() {
        let mut ranger = MoverRanger::new("unbound");
        assert_eq!(ranger.steps().value(), DEFAULT_STEPS);
        ranger.steps_mut().set_value(0);
        assert_eq!(ranger.steps().value(), 1);
        assert!(ranger.args().is_none());
        assert_eq!(ranger.label(), "");
    }

    #[test]
    fn test_parameters_use_configured_names() {
        let names = RangeNames {
            start: "x_start".to_string(),
            stop: "x_stop".to_string(),
            steps: "x_num".to_string(),
        };
        let mut ranger = MoverRanger::with_names("x", names, 4);
        ranger.set_range(1.0, 2.0, 4);

        let params = ranger.parameters();
        assert_eq!(params.get("x_start"), Some(&ParamValue::Float(1.0)));
        assert_eq!(params.get("x_stop"), Some(&ParamValue::Float(2.0)));
        assert_eq!(params.get("x_num"), Some(&ParamValue::Int(4)));
    }

    #[test]
    fn test_args_reference_bound_mover() {
        let mover: MoverRef = Arc::new(SimMover::new("m2"));
        let ranger = MoverRanger::for_mover(mover.clone());
        let (bound, ..) = ranger.args().unwrap();
        assert!(Arc::ptr_eq(&bound, &mover));
        assert_eq!(ranger.label(), "m2");
    }
}
