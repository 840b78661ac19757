//! Plan consumer behind the Run button.
//!
//! Plans go into an unbounded tokio channel; a task on the runtime drains it
//! and logs each invocation. Nothing is executed.

use daq_forms::plans::PlanInvocation;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Spawn the logging consumer on `handle`.
///
/// Returns the sending half for the control surface and the task, which
/// resolves to the number of plans seen once every sender is dropped.
pub fn spawn_plan_logger(
    handle: &Handle,
) -> (mpsc::UnboundedSender<PlanInvocation>, JoinHandle<usize>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<PlanInvocation>();
    let task = handle.spawn(async move {
        let mut received = 0usize;
        while let Some(plan) = rx.recv().await {
            received += 1;
            let md = plan
                .md
                .as_ref()
                .map(|md| serde_json::to_string(md).unwrap_or_default());
            info!(
                plan = %plan,
                plan_type = plan.plan_type(),
                num_points = plan.num_points(),
                args = ?plan.plan_args(),
                md = md.as_deref().unwrap_or("{}"),
                "plan received"
            );
        }
        debug!(received, "plan queue closed");
        received
    });
    (tx, task)
}
