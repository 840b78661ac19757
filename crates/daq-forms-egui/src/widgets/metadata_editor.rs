//! Typed key/value metadata list.
//!
//! Each row edits the key and a value editor matching the entry's type; the
//! value type is fixed when the row is added.

use daq_forms::metadata::{MetadataEditor, MetadataType};
use daq_forms::params::ParamValue;

use super::{FormWidget, DATETIME_FORMAT};

impl FormWidget for MetadataEditor {
    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Metadata");
        ui.add_space(4.0);

        let mut to_remove: Option<usize> = None;

        egui::Grid::new("metadata_entries")
            .num_columns(4)
            .striped(true)
            .show(ui, |ui| {
                for (idx, entry) in self.entries_mut().iter_mut().enumerate() {
                    ui.add(egui::TextEdit::singleline(entry.key_mut()).desired_width(120.0));
                    ui.weak(entry.kind().as_str());
                    value_editor(ui, entry.value_mut());
                    if ui.button("✖").on_hover_text("Remove this entry").clicked() {
                        to_remove = Some(idx);
                    }
                    ui.end_row();
                }
            });

        if let Some(idx) = to_remove {
            self.remove(idx);
        }

        ui.horizontal(|ui| {
            let id = ui.make_persistent_id("metadata_new_kind");
            let mut kind = ui
                .data_mut(|d| d.get_temp::<MetadataType>(id))
                .unwrap_or(MetadataType::String);
            egui::ComboBox::from_id_salt("metadata_new_kind")
                .selected_text(kind.as_str())
                .show_ui(ui, |ui| {
                    for option in MetadataType::ALL {
                        ui.selectable_value(&mut kind, option, option.as_str());
                    }
                });
            ui.data_mut(|d| d.insert_temp(id, kind));

            if ui.button("+ Add").clicked() {
                self.add_new(kind);
            }
        });
    }
}

fn value_editor(ui: &mut egui::Ui, value: &mut ParamValue) -> egui::Response {
    match value {
        ParamValue::Text(text) => ui.add(egui::TextEdit::singleline(text).desired_width(160.0)),
        ParamValue::Int(v) => ui.add(egui::DragValue::new(v).speed(1.0)),
        ParamValue::Float(v) => ui.add(egui::DragValue::new(v).speed(0.1)),
        ParamValue::DateTime(v) => ui.label(v.format(DATETIME_FORMAT).to_string()),
    }
}
