//! egui renderings of the form models.
//!
//! Each model from `daq-forms` gets a [`FormWidget`] impl so panels can call
//! `model.ui(ui)` the same way for every editor.

pub mod detector_picker;
pub mod device_tree;
pub mod fields;
pub mod metadata_editor;
pub mod motor_picker;
pub mod mover_ranger;

pub use fields::{optional_field, stacked_label, FieldEditor, DATETIME_FORMAT};

/// A form model that draws itself and applies user edits in place.
pub trait FormWidget {
    /// Render into `ui`.
    fn ui(&mut self, ui: &mut egui::Ui);
}
