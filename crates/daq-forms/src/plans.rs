//! Plan functions and the invocations scan panels produce.
//!
//! A plan function takes detectors, motion or counting arguments and
//! optional metadata, and returns whatever the executor consumes. Closures
//! with the right signature are plan functions. The crate also ships
//! [`scan`] and [`count`], which materialize a [`PlanInvocation`] describing
//! the call for an external run engine.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::devices::{DetectorRef, MoverRef};
use crate::metadata::Metadata;

/// One-axis plan: `(detectors, mover, start, stop, steps, md)`.
pub trait AxisPlanFn<P> {
    /// Invoke the plan.
    fn call(
        &self,
        detectors: Vec<DetectorRef>,
        mover: MoverRef,
        start: f64,
        stop: f64,
        steps: i64,
        md: Option<Metadata>,
    ) -> P;
}

impl<P, F> AxisPlanFn<P> for F
where
    F: Fn(Vec<DetectorRef>, MoverRef, f64, f64, i64, Option<Metadata>) -> P,
{
    fn call(
        &self,
        detectors: Vec<DetectorRef>,
        mover: MoverRef,
        start: f64,
        stop: f64,
        steps: i64,
        md: Option<Metadata>,
    ) -> P {
        self(detectors, mover, start, stop, steps, md)
    }
}

/// Counting plan: `(detectors, num, delay, md)`.
pub trait CountPlanFn<P> {
    /// Invoke the plan.
    fn call(
        &self,
        detectors: Vec<DetectorRef>,
        num: i64,
        delay: Option<f64>,
        md: Option<Metadata>,
    ) -> P;
}

impl<P, F> CountPlanFn<P> for F
where
    F: Fn(Vec<DetectorRef>, i64, Option<f64>, Option<Metadata>) -> P,
{
    fn call(
        &self,
        detectors: Vec<DetectorRef>,
        num: i64,
        delay: Option<f64>,
        md: Option<Metadata>,
    ) -> P {
        self(detectors, num, delay, md)
    }
}

/// Motion or counting arguments of an invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanArgs {
    /// Step scan of one mover
    Scan {
        /// Mover to scan
        #[serde(serialize_with = "serialize_mover")]
        mover: MoverRef,
        /// First position
        start: f64,
        /// Last position
        stop: f64,
        /// Number of points
        steps: i64,
    },
    /// Repeated reads without motion
    Count {
        /// Number of repeats
        num: i64,
        /// Seconds between repeats, if any
        delay: Option<f64>,
    },
}

fn serialize_mover<S: Serializer>(mover: &MoverRef, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(mover.name())
}

fn serialize_detectors<S: Serializer>(
    detectors: &[DetectorRef],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(detectors.iter().map(|d| d.name()))
}

/// A materialized plan call, ready to hand to an executor.
#[derive(Debug, Clone, Serialize)]
pub struct PlanInvocation {
    /// Detectors to read at every point
    #[serde(serialize_with = "serialize_detectors")]
    pub detectors: Vec<DetectorRef>,
    /// Motion or counting arguments
    pub args: PlanArgs,
    /// User metadata, if a metadata editor was attached
    pub md: Option<Metadata>,
}

impl PlanInvocation {
    /// Plan type identifier (`"scan"` or `"count"`).
    #[must_use]
    pub fn plan_type(&self) -> &'static str {
        match self.args {
            PlanArgs::Scan { .. } => "scan",
            PlanArgs::Count { .. } => "count",
        }
    }

    /// Human-readable plan name.
    #[must_use]
    pub fn plan_name(&self) -> &'static str {
        match self.args {
            PlanArgs::Scan { .. } => "Scan",
            PlanArgs::Count { .. } => "Count",
        }
    }

    /// Detector names in invocation order.
    #[must_use]
    pub fn detector_names(&self) -> Vec<String> {
        self.detectors.iter().map(|d| d.name().to_string()).collect()
    }

    /// Mover names (empty for counts).
    #[must_use]
    pub fn mover_names(&self) -> Vec<String> {
        match &self.args {
            PlanArgs::Scan { mover, .. } => vec![mover.name().to_string()],
            PlanArgs::Count { .. } => Vec::new(),
        }
    }

    /// Total number of points the plan will emit.
    #[must_use]
    pub fn num_points(&self) -> i64 {
        match self.args {
            PlanArgs::Scan { steps, .. } => steps,
            PlanArgs::Count { num, .. } => num,
        }
    }

    /// Plan arguments as strings, as reported in run start documents.
    #[must_use]
    pub fn plan_args(&self) -> HashMap<String, String> {
        let mut args = HashMap::new();
        match &self.args {
            PlanArgs::Scan {
                mover,
                start,
                stop,
                steps,
            } => {
                args.insert("motor".to_string(), mover.name().to_string());
                args.insert("start".to_string(), start.to_string());
                args.insert("stop".to_string(), stop.to_string());
                args.insert("num".to_string(), steps.to_string());
            }
            PlanArgs::Count { num, delay } => {
                args.insert("num".to_string(), num.to_string());
                args.insert(
                    "delay".to_string(),
                    delay.map(|d| d.to_string()).unwrap_or_else(|| "None".to_string()),
                );
            }
        }
        args.insert("detectors".to_string(), self.detector_names().join(","));
        args
    }
}

impl fmt::Display for PlanInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dets = self.detector_names().join(", ");
        match &self.args {
            PlanArgs::Scan {
                mover,
                start,
                stop,
                steps,
            } => write!(
                f,
                "scan([{}], {}, {}, {}, {})",
                dets,
                mover.name(),
                start,
                stop,
                steps
            ),
            PlanArgs::Count { num, delay } => match delay {
                Some(d) => write!(f, "count([{}], num={}, delay={})", dets, num, d),
                None => write!(f, "count([{}], num={}, delay=None)", dets, num),
            },
        }
    }
}

/// Step-scan plan function producing a [`PlanInvocation`].
pub fn scan(
    detectors: Vec<DetectorRef>,
    mover: MoverRef,
    start: f64,
    stop: f64,
    steps: i64,
    md: Option<Metadata>,
) -> PlanInvocation {
    PlanInvocation {
        detectors,
        args: PlanArgs::Scan {
            mover,
            start,
            stop,
            steps,
        },
        md,
    }
}

/// Counting plan function producing a [`PlanInvocation`].
pub fn count(
    detectors: Vec<DetectorRef>,
    num: i64,
    delay: Option<f64>,
    md: Option<Metadata>,
) -> PlanInvocation {
    PlanInvocation {
        detectors,
        args: PlanArgs::Count { num, delay },
        md,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sim::{SimDetector, SimMover};

    fn dets() -> Vec<DetectorRef> {
        vec![
            Arc::new(SimDetector::new("I0")) as DetectorRef,
            Arc::new(SimDetector::new("It")),
        ]
    }

    #[test]
    fn test_scan_plan_args() {
        let plan = scan(dets(), Arc::new(SimMover::new("th")), 0.0, 10.0, 11, None);
        assert_eq!(plan.plan_type(), "scan");
        assert_eq!(plan.num_points(), 11);
        assert_eq!(plan.mover_names(), vec!["th".to_string()]);

        let args = plan.plan_args();
        assert_eq!(args.get("motor"), Some(&"th".to_string()));
        assert_eq!(args.get("num"), Some(&"11".to_string()));
        assert_eq!(args.get("detectors"), Some(&"I0,It".to_string()));
    }

    #[test]
    fn test_count_display() {
        let plan = count(dets(), 5, None, None);
        assert_eq!(plan.to_string(), "count([I0, It], num=5, delay=None)");
        assert_eq!(plan.plan_args().get("delay"), Some(&"None".to_string()));

        let plan = count(dets(), 3, Some(2.5), None);
        assert_eq!(plan.to_string(), "count([I0, It], num=3, delay=2.5)");
    }

    #[test]
    fn test_invocation_serializes_names() {
        let plan = scan(dets(), Arc::new(SimMover::new("th")), 0.0, 1.0, 2, None);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["detectors"], serde_json::json!(["I0", "It"]));
        assert_eq!(json["args"]["type"], "scan");
        assert_eq!(json["args"]["mover"], "th");
        assert!(json["md"].is_null());
    }

    #[test]
    fn test_closures_are_plan_functions() {
        let plan = |dets: Vec<DetectorRef>, num: i64, _delay: Option<f64>, _md: Option<Metadata>| {
            dets.len() as i64 * num
        };
        assert_eq!(CountPlanFn::call(&plan, dets(), 4, None, None), 8);
    }
}
