//! `daq-forms`
//!
//! Headless form model for configuring and launching scan plans.
//!
//! Forms are built from small editors ([`field`]) that contribute
//! name-keyed parameters, optionally behind an enable checkbox
//! ([`optional`]). Composites bind those editors to instruments: a range
//! selector per mover ([`range`]), a picker choosing one mover
//! ([`motor_picker`]), a detector checklist ([`detector_picker`]) and a
//! typed metadata list ([`metadata`]). Scan panels ([`panel`]) turn the form
//! state into a plan invocation ([`plans`]); tabs ([`tabs`]) and the control
//! surface ([`control`]) hand the visible panel's plan to an external queue.
//!
//! Nothing here renders. The `daq-forms-egui` crate draws these models with
//! egui and mutates them in response to user input.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use daq_forms::prelude::*;
//!
//! let movers: Vec<MoverRef> = vec![Arc::new(SimMover::new("th").with_limits(-10.0, 10.0))];
//! let detectors: Vec<DetectorRef> = vec![Arc::new(SimDetector::new("I0"))];
//!
//! let mut panel = AxisScanPanel::new(scan, movers, detectors);
//! panel.detectors_mut().set_checked(0, true);
//! panel.motors_mut().active_mut().unwrap().set_range(-20.0, 5.0, 6);
//!
//! let plan = panel.build_plan().unwrap();
//! assert_eq!(plan.to_string(), "scan([I0], th, -10, 5, 6)");
//! ```

pub mod config;
pub mod control;
pub mod detector_picker;
pub mod devices;
pub mod error;
pub mod field;
pub mod metadata;
pub mod motor_picker;
pub mod optional;
pub mod panel;
pub mod params;
pub mod plans;
pub mod range;
pub mod sim;
pub mod tabs;
pub mod tree;

pub use error::{FormError, Result};

/// Commonly used types.
pub mod prelude {
    pub use crate::config::FormsConfig;
    pub use crate::control::{ControlSurface, PlanQueue};
    pub use crate::detector_picker::DetectorPicker;
    pub use crate::devices::{Detector, DetectorRef, Device, Kind, Limits, Mover, MoverRef};
    pub use crate::field::{DateTimeField, Field, FloatSpin, IntSpin, TextField};
    pub use crate::metadata::{Metadata, MetadataEditor, MetadataType};
    pub use crate::motor_picker::MotorPicker;
    pub use crate::optional::{FieldState, LabelLayout, OptionalField};
    pub use crate::panel::{AxisScanPanel, CountScanPanel, PanelControls, ScanPanel};
    pub use crate::params::{merge_parameters, ParamValue, Parameters};
    pub use crate::plans::{count, scan, PlanArgs, PlanInvocation};
    pub use crate::range::MoverRanger;
    pub use crate::sim::{SimDetector, SimDevice, SimMover};
    pub use crate::tabs::ScanTabs;
    pub use crate::tree::{DeviceNode, DeviceTreeView};
}
