//! One scan panel: its own editors, then detectors, then metadata.

use daq_forms::panel::{PanelControls, ScanPanel};

use crate::widgets::{optional_field, FormWidget};

/// Draw `panel`, whichever concrete panel it is.
pub fn scan_panel_ui<P, S: ScanPanel<P> + ?Sized>(ui: &mut egui::Ui, panel: &mut S) {
    match panel.controls_mut() {
        PanelControls::Axis(motors) => {
            ui.group(|ui| {
                motors.ui(ui);
            });
        }
        PanelControls::Count { num, delay } => {
            ui.group(|ui| {
                optional_field(ui, num);
                optional_field(ui, delay);
            });
        }
    }

    ui.add_space(4.0);
    panel.detectors_mut().ui(ui);

    if let Some(metadata) = panel.metadata_mut() {
        ui.add_space(4.0);
        ui.group(|ui| metadata.ui(ui));
    }
}
