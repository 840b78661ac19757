//! Scan panels and the tabbed control surface.

pub mod control;
pub mod scan_panel;

pub use control::{control_surface_ui, RunOutcome};
pub use scan_panel::scan_panel_ui;
