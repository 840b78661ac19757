//! Editors for the scalar fields and the checkbox row around them.

use chrono::NaiveDateTime;
use daq_forms::field::{DateTimeField, Field, FloatSpin, IntSpin, TextField};
use daq_forms::optional::{LabelLayout, OptionalField};

/// Display and parse format of date-time editors.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A field with an egui editor.
pub trait FieldEditor {
    /// Draw the editor. Disabled fields render greyed out and ignore input.
    fn editor(&mut self, ui: &mut egui::Ui) -> egui::Response;
}

impl FieldEditor for TextField {
    fn editor(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let enabled = self.is_enabled();
        ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(self.text_mut()).desired_width(160.0),
        )
    }
}

impl FieldEditor for IntSpin {
    fn editor(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let (min, max) = self.range();
        let mut value = self.value();
        let mut drag = egui::DragValue::new(&mut value).range(min..=max).speed(1.0);
        if let Some(suffix) = self.suffix() {
            drag = drag.suffix(suffix);
        }
        let response = ui.add_enabled(self.is_enabled(), drag);
        if response.changed() {
            self.set_value(value);
        }
        response
    }
}

impl FieldEditor for FloatSpin {
    fn editor(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let (min, max) = self.range();
        let decimals = self.decimals();
        let mut value = self.value();
        let mut drag = egui::DragValue::new(&mut value)
            .range(min..=max)
            .speed(0.1)
            .fixed_decimals(decimals as usize);
        if let Some(suffix) = self.suffix() {
            drag = drag.suffix(suffix);
        }
        let response = ui.add_enabled(self.is_enabled(), drag);
        if response.changed() {
            self.set_value(value);
        }
        response
    }
}

impl FieldEditor for DateTimeField {
    /// Free-text entry in [`DATETIME_FORMAT`]; the field only changes once
    /// the text parses. The draft is kept in egui temp storage between frames.
    fn editor(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let id = ui.make_persistent_id(("datetime", self.name()));
        let mut draft = ui
            .data_mut(|d| d.get_temp::<String>(id))
            .unwrap_or_else(|| self.value().format(DATETIME_FORMAT).to_string());

        let response = ui.add_enabled(
            self.is_enabled(),
            egui::TextEdit::singleline(&mut draft).desired_width(160.0),
        );
        if response.changed() {
            if let Some(value) = parse_datetime(&draft) {
                self.set_value(value);
            }
        }
        if response.lost_focus() {
            draft = self.value().format(DATETIME_FORMAT).to_string();
        }
        ui.data_mut(|d| d.insert_temp(id, draft));
        response
    }
}

/// Parse user text in [`DATETIME_FORMAT`].
#[must_use]
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), DATETIME_FORMAT).ok()
}

/// Label stacked above its editor.
pub fn stacked_label<R>(
    ui: &mut egui::Ui,
    label: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    ui.vertical(|ui| {
        ui.label(label);
        add_contents(ui)
    })
    .inner
}

/// Checkbox, label and editor laid out per the field's [`LabelLayout`].
///
/// Required fields draw a ticked checkbox that cannot be changed.
pub fn optional_field<F: Field + FieldEditor>(ui: &mut egui::Ui, field: &mut OptionalField<F>) {
    match field.layout() {
        LabelLayout::Horizontal => {
            ui.horizontal(|ui| {
                toggle(ui, field);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    field.inner_mut().editor(ui);
                });
            });
        }
        LabelLayout::Vertical => {
            ui.vertical(|ui| {
                toggle(ui, field);
                field.inner_mut().editor(ui);
            });
        }
    }
}

fn toggle<F: Field>(ui: &mut egui::Ui, field: &mut OptionalField<F>) {
    let mut checked = field.is_checked();
    let label = field.label().to_string();
    let response = ui.add_enabled(
        field.is_toggle_enabled(),
        egui::Checkbox::new(&mut checked, label),
    );
    if response.changed() {
        field.set_checked(checked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_support::render;

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime(" 2024-03-01 12:30:00 ").unwrap();
        assert_eq!(parsed.format(DATETIME_FORMAT).to_string(), "2024-03-01 12:30:00");
        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn test_rendering_leaves_values_alone() {
        let mut delay = OptionalField::optional("Delay", FloatSpin::new("delay"))
            .with_layout(LabelLayout::Vertical);
        let mut num = OptionalField::required("Count", IntSpin::new("num"));
        let mut stamp = DateTimeField::new("when");
        let before = stamp.value();

        render(|ui| {
            optional_field(ui, &mut delay);
            optional_field(ui, &mut num);
            stamp.editor(ui);
        });

        assert!(!delay.is_checked());
        assert!(num.is_checked());
        assert_eq!(stamp.value(), before);
    }
}
