//! Titled checklist of detectors.

use daq_forms::detector_picker::DetectorPicker;

use super::FormWidget;

impl FormWidget for DetectorPicker {
    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.strong(self.title().to_string());
            if self.is_empty() {
                ui.weak("No detectors configured");
                return;
            }
            let names: Vec<String> = self
                .entries()
                .map(|(detector, _)| detector.name().to_string())
                .collect();
            ui.horizontal_wrapped(|ui| {
                for (index, name) in names.iter().enumerate() {
                    if let Some(checked) = self.checked_mut(index) {
                        ui.checkbox(checked, name);
                    }
                }
            });
        });
    }
}
