//! Mover selector with the active mover's range underneath.

use daq_forms::motor_picker::MotorPicker;

use super::FormWidget;

impl FormWidget for MotorPicker {
    fn ui(&mut self, ui: &mut egui::Ui) {
        if self.is_empty() {
            ui.weak("No movers configured");
            return;
        }

        let names: Vec<String> = self.mover_names().into_iter().map(str::to_string).collect();
        let mut selected = self.active_index().unwrap_or(0);
        let current = names.get(selected).cloned().unwrap_or_default();

        ui.horizontal(|ui| {
            ui.label("Motor:");
            egui::ComboBox::from_id_salt("motor_picker")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for (index, name) in names.iter().enumerate() {
                        ui.selectable_value(&mut selected, index, name);
                    }
                });
        });
        self.select(selected);

        if let Some(ranger) = self.active_mut() {
            ranger.ui(ui);
        }
    }
}
