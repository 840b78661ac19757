//! Top-level control surface and the queue it feeds.
//!
//! The control surface is the only place that talks to the execution side:
//! "run" builds the visible tab's plan and pushes it onto a [`PlanQueue`].
//! The push is fire-and-forget; a rejected plan is logged and dropped.

use std::sync::mpsc;

use tokio::sync::mpsc as tokio_mpsc;
use tracing::{info, warn};

use crate::tabs::ScanTabs;

/// Sink accepting plans for an external executor.
pub trait PlanQueue<P> {
    /// Hand a plan over. Failures are the sink's business.
    fn put(&self, plan: P);
}

impl<P> PlanQueue<P> for tokio_mpsc::UnboundedSender<P> {
    fn put(&self, plan: P) {
        if self.send(plan).is_err() {
            warn!("plan queue closed; plan dropped");
        }
    }
}

impl<P> PlanQueue<P> for mpsc::Sender<P> {
    fn put(&self, plan: P) {
        if self.send(plan).is_err() {
            warn!("plan queue closed; plan dropped");
        }
    }
}

impl<P> PlanQueue<P> for tokio_mpsc::Sender<P> {
    fn put(&self, plan: P) {
        if let Err(err) = self.try_send(plan) {
            warn!(%err, "plan queue rejected plan");
        }
    }
}

/// Tabs plus the queue they run into.
pub struct ControlSurface<P> {
    queue: Box<dyn PlanQueue<P>>,
    tabs: ScanTabs<P>,
}

impl<P> ControlSurface<P> {
    /// Own `queue` and `tabs`.
    pub fn new(queue: impl PlanQueue<P> + 'static, tabs: ScanTabs<P>) -> Self {
        Self {
            queue: Box::new(queue),
            tabs,
        }
    }

    /// Scan tabs.
    pub fn tabs(&self) -> &ScanTabs<P> {
        &self.tabs
    }

    /// Scan tabs, mutably.
    pub fn tabs_mut(&mut self) -> &mut ScanTabs<P> {
        &mut self.tabs
    }

    /// Build the visible tab's plan and push it. Returns whether a plan was
    /// built; whether the queue accepted it is not observed.
    pub fn run(&mut self) -> bool {
        let title = self
            .tabs
            .current()
            .map(|t| t.title.clone())
            .unwrap_or_default();
        match self.tabs.current_plan() {
            Some(plan) => {
                info!(tab = %title, "queueing plan");
                self.queue.put(plan);
                true
            }
            None => {
                warn!(tab = %title, "nothing to run");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::devices::DetectorRef;
    use crate::panel::CountScanPanel;
    use crate::plans::{count, PlanInvocation};
    use crate::sim::SimDetector;

    fn count_tabs() -> ScanTabs<PlanInvocation> {
        ScanTabs::new().with_tab(
            "Count",
            CountScanPanel::new(count, [Arc::new(SimDetector::new("I0")) as DetectorRef]),
        )
    }

    #[test]
    fn test_run_pushes_plan() {
        let (tx, mut rx) = tokio_mpsc::unbounded_channel();
        let mut surface = ControlSurface::new(tx, count_tabs());

        assert!(surface.run());
        assert!(surface.run());

        let plan = rx.try_recv().unwrap();
        assert_eq!(plan.plan_type(), "count");
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_run_with_std_channel() {
        let (tx, rx) = mpsc::channel();
        let mut surface = ControlSurface::new(tx, count_tabs());
        surface
            .tabs_mut()
            .current_mut()
            .unwrap()
            .panel
            .detectors_mut()
            .set_checked(0, true);

        surface.run();
        let plan = rx.try_recv().unwrap();
        assert_eq!(plan.detector_names(), vec!["I0".to_string()]);
    }

    #[test]
    fn test_closed_queue_is_not_an_error() {
        let (tx, rx) = tokio_mpsc::unbounded_channel::<PlanInvocation>();
        drop(rx);
        let mut surface = ControlSurface::new(tx, count_tabs());
        assert!(surface.run());
    }

    #[test]
    fn test_full_bounded_queue_drops_plan() {
        let (tx, mut rx) = tokio_mpsc::channel(1);
        let mut surface = ControlSurface::new(tx, count_tabs());
        surface.run();
        surface.run();
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_empty_surface_runs_nothing() {
        let (tx, mut rx) = tokio_mpsc::unbounded_channel::<PlanInvocation>();
        let mut surface = ControlSurface::new(tx, ScanTabs::new());
        assert!(!surface.run());
        assert!(rx.try_recv().is_err());
    }
}
