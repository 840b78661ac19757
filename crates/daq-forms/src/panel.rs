//! Scan configuration panels.
//!
//! A panel binds a plan function to the selectors that feed it and builds
//! the plan invocation on demand. No validation happens here beyond what the
//! editors already enforce (ranges, steps >= 1).

use tracing::debug;

use crate::detector_picker::DetectorPicker;
use crate::devices::{DetectorRef, MoverRef};
use crate::field::{Field, FloatSpin, IntSpin, SPIN_LIMIT};
use crate::metadata::{Metadata, MetadataEditor};
use crate::motor_picker::MotorPicker;
use crate::optional::{LabelLayout, OptionalField};
use crate::params::{merge_parameters, Parameters};
use crate::plans::{AxisPlanFn, CountPlanFn};

/// Upper bound of the inter-repeat delay, in seconds.
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Decimal places of the delay editor.
pub const DELAY_DECIMALS: u32 = 1;

/// Panel-specific editors, exposed so renderers can draw type-erased panels.
pub enum PanelControls<'a> {
    /// Motor selection of an axis scan
    Axis(&'a mut MotorPicker),
    /// Repeat count and delay of a count
    Count {
        /// Repeat count
        num: &'a mut OptionalField<IntSpin>,
        /// Inter-repeat delay
        delay: &'a mut OptionalField<FloatSpin>,
    },
}

/// Anything that can build a plan from its current form state.
pub trait ScanPanel<P> {
    /// Build the plan invocation, or `None` when the form has nothing to
    /// build from (e.g. no movers configured).
    fn build_plan(&self) -> Option<P>;

    /// Detector selection shared by all panels.
    fn detectors(&self) -> &DetectorPicker;

    /// Detector selection, mutably.
    fn detectors_mut(&mut self) -> &mut DetectorPicker;

    /// Panel-specific editors.
    fn controls_mut(&mut self) -> PanelControls<'_>;

    /// Attached metadata editor, if any.
    fn metadata(&self) -> Option<&MetadataEditor>;

    /// Attached metadata editor, mutably.
    fn metadata_mut(&mut self) -> Option<&mut MetadataEditor>;

    /// Collected metadata, `None` when no editor is attached.
    fn collect_metadata(&self) -> Option<Metadata> {
        self.metadata().map(MetadataEditor::collect)
    }
}

/// One-axis scan: motor picker + detector picker (+ metadata).
pub struct AxisScanPanel<P> {
    plan: Box<dyn AxisPlanFn<P>>,
    motors: MotorPicker,
    detectors: DetectorPicker,
    metadata: Option<MetadataEditor>,
}

impl<P> AxisScanPanel<P> {
    /// Build a panel over `movers` and `detectors` without metadata.
    pub fn new(
        plan: impl AxisPlanFn<P> + 'static,
        movers: impl IntoIterator<Item = MoverRef>,
        detectors: impl IntoIterator<Item = DetectorRef>,
    ) -> Self {
        Self {
            plan: Box::new(plan),
            motors: MotorPicker::new(movers),
            detectors: DetectorPicker::new(detectors),
            metadata: None,
        }
    }

    /// Builder: attach an empty metadata editor.
    #[must_use]
    pub fn with_metadata(mut self) -> Self {
        self.metadata = Some(MetadataEditor::new());
        self
    }

    /// Builder: initial step count for every mover.
    #[must_use]
    pub fn with_default_steps(mut self, steps: i64) -> Self {
        self.motors.set_steps(steps);
        self
    }

    /// Motor selection.
    pub fn motors(&self) -> &MotorPicker {
        &self.motors
    }

    /// Motor selection, mutably.
    pub fn motors_mut(&mut self) -> &mut MotorPicker {
        &mut self.motors
    }

    /// Active range as a parameter map.
    #[must_use]
    pub fn parameters(&self) -> Parameters {
        self.motors
            .active()
            .map(|r| merge_parameters([r as &dyn Field]))
            .unwrap_or_default()
    }
}

impl<P> ScanPanel<P> for AxisScanPanel<P> {
    fn build_plan(&self) -> Option<P> {
        let md = self.collect_metadata();
        let detectors = self.detectors.active_detectors();
        let Some((mover, start, stop, steps)) = self.motors.args() else {
            debug!("no active mover; nothing to scan");
            return None;
        };
        debug!(
            mover = mover.name(),
            start,
            stop,
            steps,
            detectors = detectors.len(),
            "building axis scan"
        );
        Some(self.plan.call(detectors, mover, start, stop, steps, md))
    }

    fn detectors(&self) -> &DetectorPicker {
        &self.detectors
    }

    fn detectors_mut(&mut self) -> &mut DetectorPicker {
        &mut self.detectors
    }

    fn controls_mut(&mut self) -> PanelControls<'_> {
        PanelControls::Axis(&mut self.motors)
    }

    fn metadata(&self) -> Option<&MetadataEditor> {
        self.metadata.as_ref()
    }

    fn metadata_mut(&mut self) -> Option<&mut MetadataEditor> {
        self.metadata.as_mut()
    }
}

/// Repeated reads: detector picker, repeat count, optional delay.
pub struct CountScanPanel<P> {
    plan: Box<dyn CountPlanFn<P>>,
    detectors: DetectorPicker,
    num: OptionalField<IntSpin>,
    delay: OptionalField<FloatSpin>,
    metadata: Option<MetadataEditor>,
}

impl<P> CountScanPanel<P> {
    /// Build a panel with the default repeat limit (2^16).
    pub fn new(
        plan: impl CountPlanFn<P> + 'static,
        detectors: impl IntoIterator<Item = DetectorRef>,
    ) -> Self {
        Self::with_max_count(plan, detectors, SPIN_LIMIT)
    }

    /// Build a panel whose repeat count is bounded by `[1, max_count]`.
    pub fn with_max_count(
        plan: impl CountPlanFn<P> + 'static,
        detectors: impl IntoIterator<Item = DetectorRef>,
        max_count: i64,
    ) -> Self {
        let mut num = IntSpin::new("num");
        num.set_range(1, max_count);
        num.set_value(1);

        let mut delay = FloatSpin::new("delay");
        delay.set_range(0.0, MAX_DELAY_SECS);
        delay.set_decimals(DELAY_DECIMALS);
        delay.set_suffix(" s");

        Self {
            plan: Box::new(plan),
            detectors: DetectorPicker::new(detectors),
            num: OptionalField::required("Count", num),
            delay: OptionalField::optional("Delay", delay),
            metadata: None,
        }
    }

    /// Builder: attach an empty metadata editor.
    #[must_use]
    pub fn with_metadata(mut self) -> Self {
        self.metadata = Some(MetadataEditor::new());
        self
    }

    /// Builder: label placement of the count and delay rows.
    #[must_use]
    pub fn with_label_layout(mut self, layout: LabelLayout) -> Self {
        self.num.set_layout(layout);
        self.delay.set_layout(layout);
        self
    }

    /// Repeat count editor (always active).
    pub fn num(&self) -> &OptionalField<IntSpin> {
        &self.num
    }

    /// Repeat count editor, mutably.
    pub fn num_mut(&mut self) -> &mut OptionalField<IntSpin> {
        &mut self.num
    }

    /// Delay editor.
    pub fn delay(&self) -> &OptionalField<FloatSpin> {
        &self.delay
    }

    /// Delay editor, mutably.
    pub fn delay_mut(&mut self) -> &mut OptionalField<FloatSpin> {
        &mut self.delay
    }

    /// Active count parameters (`num`, plus `delay` when enabled).
    #[must_use]
    pub fn parameters(&self) -> Parameters {
        merge_parameters([&self.num as &dyn Field, &self.delay as &dyn Field])
    }
}

impl<P> ScanPanel<P> for CountScanPanel<P> {
    fn build_plan(&self) -> Option<P> {
        let md = self.collect_metadata();
        let detectors = self.detectors.active_detectors();
        let num = self.num.inner().value();
        let delay = self
            .delay
            .is_active()
            .then(|| self.delay.inner().value());
        debug!(num, ?delay, detectors = detectors.len(), "building count");
        Some(self.plan.call(detectors, num, delay, md))
    }

    fn detectors(&self) -> &DetectorPicker {
        &self.detectors
    }

    fn detectors_mut(&mut self) -> &mut DetectorPicker {
        &mut self.detectors
    }

    fn controls_mut(&mut self) -> PanelControls<'_> {
        PanelControls::Count {
            num: &mut self.num,
            delay: &mut self.delay,
        }
    }

    fn metadata(&self) -> Option<&MetadataEditor> {
        self.metadata.as_ref()
    }

    fn metadata_mut(&mut self) -> Option<&mut MetadataEditor> {
        self.metadata.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::MetadataType;
    use crate::params::ParamValue;
    use crate::plans::{count, scan, PlanArgs, PlanInvocation};
    use crate::sim::{SimDetector, SimMover};

    fn detectors() -> Vec<DetectorRef> {
        vec![
            Arc::new(SimDetector::new("I0")) as DetectorRef,
            Arc::new(SimDetector::new("It")),
        ]
    }

    #[test]
    fn test_axis_scan_builds_call() {
        let mover: MoverRef = Arc::new(SimMover::new("M"));
        let mut panel = AxisScanPanel::new(scan, [mover.clone()], detectors());
        panel.detectors_mut().set_checked(1, true);
        panel
            .motors_mut()
            .active_mut()
            .unwrap()
            .set_range(0.0, 10.0, 11);

        let plan: PlanInvocation = panel.build_plan().unwrap();
        assert_eq!(plan.detector_names(), vec!["It".to_string()]);
        match plan.args {
            PlanArgs::Scan {
                mover: m,
                start,
                stop,
                steps,
            } => {
                assert!(Arc::ptr_eq(&m, &mover));
                assert_eq!((start, stop, steps), (0.0, 10.0, 11));
            }
            PlanArgs::Count { .. } => panic!("expected a scan"),
        }
        assert!(plan.md.is_none());
    }

    #[test]
    fn test_axis_scan_without_movers() {
        let panel = AxisScanPanel::new(scan, Vec::new(), detectors());
        assert!(panel.build_plan().is_none());
        assert!(panel.parameters().is_empty());
    }

    #[test]
    fn test_axis_scan_metadata() {
        let mut panel =
            AxisScanPanel::new(scan, [Arc::new(SimMover::new("M")) as MoverRef], detectors())
                .with_metadata();
        let md = panel.metadata_mut().unwrap();
        let idx = md.add_new(MetadataType::String);
        md.rename(idx, "sample");
        md.set_value(idx, ParamValue::Text("Si".into()));

        let plan = panel.build_plan().unwrap();
        let md = plan.md.unwrap();
        assert_eq!(md.get("sample"), Some(&ParamValue::Text("Si".into())));
    }

    #[test]
    fn test_count_delay_off_is_none() {
        let mut panel = CountScanPanel::new(count, detectors());
        panel.num_mut().inner_mut().set_value(5);

        let plan = panel.build_plan().unwrap();
        match plan.args {
            PlanArgs::Count { num, delay } => {
                assert_eq!(num, 5);
                assert_eq!(delay, None);
            }
            PlanArgs::Scan { .. } => panic!("expected a count"),
        }
    }

    #[test]
    fn test_count_delay_on() {
        let mut panel = CountScanPanel::new(count, detectors());
        panel.num_mut().inner_mut().set_value(5);
        panel.delay_mut().set_checked(true);
        panel.delay_mut().inner_mut().set_value(2.5);

        let plan = panel.build_plan().unwrap();
        assert!(matches!(
            plan.args,
            PlanArgs::Count {
                num: 5,
                delay: Some(d)
            } if (d - 2.5).abs() < 1e-12
        ));
        assert!(panel.parameters().contains_key("delay"));
    }

    #[test]
    fn test_count_bounds() {
        let mut panel = CountScanPanel::with_max_count(count, detectors(), 100);
        panel.num_mut().inner_mut().set_value(0);
        assert_eq!(panel.num().inner().value(), 1);
        panel.num_mut().inner_mut().set_value(1000);
        assert_eq!(panel.num().inner().value(), 100);

        panel.delay_mut().set_checked(true);
        panel.delay_mut().inner_mut().set_value(7200.0);
        assert_eq!(panel.delay().inner().value(), MAX_DELAY_SECS);
        panel.delay_mut().inner_mut().set_value(-1.0);
        assert_eq!(panel.delay().inner().value(), 0.0);
    }

    #[test]
    fn test_controls_expose_panel_editors() {
        let mut axis = AxisScanPanel::new(scan, [Arc::new(SimMover::new("M")) as MoverRef], detectors());
        match ScanPanel::<PlanInvocation>::controls_mut(&mut axis) {
            PanelControls::Axis(motors) => motors.active_mut().unwrap().set_range(1.0, 2.0, 2),
            PanelControls::Count { .. } => panic!("expected axis controls"),
        }
        assert_eq!(axis.motors().args().unwrap().1, 1.0);

        let mut counter = CountScanPanel::new(count, detectors()).with_label_layout(LabelLayout::Vertical);
        match ScanPanel::<PlanInvocation>::controls_mut(&mut counter) {
            PanelControls::Count { num, delay } => {
                num.inner_mut().set_value(3);
                assert_eq!(delay.layout(), LabelLayout::Vertical);
            }
            PanelControls::Axis(_) => panic!("expected count controls"),
        }
        assert_eq!(counter.num().inner().value(), 3);
    }

    #[test]
    fn test_count_num_cannot_be_disabled() {
        let mut panel = CountScanPanel::new(count, detectors());
        panel.num_mut().set_checked(false);
        assert!(panel.parameters().contains_key("num"));
        assert!(!panel.parameters().contains_key("delay"));
    }
}
