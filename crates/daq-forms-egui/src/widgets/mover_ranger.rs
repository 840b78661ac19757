//! Start/stop/steps row for one mover.

use daq_forms::range::MoverRanger;

use super::{stacked_label, FieldEditor, FormWidget};

impl FormWidget for MoverRanger {
    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong(self.label().to_string());
            ui.add_space(8.0);
            stacked_label(ui, "Start", |ui| self.start_mut().editor(ui));
            stacked_label(ui, "Stop", |ui| self.stop_mut().editor(ui));
            stacked_label(ui, "Steps", |ui| self.steps_mut().editor(ui));
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use daq_forms::devices::MoverRef;
    use daq_forms::sim::SimMover;

    use super::*;
    use crate::widgets::test_support::render;

    #[test]
    fn test_render_keeps_range() {
        let mover: MoverRef = Arc::new(SimMover::new("th").with_limits(-1.0, 1.0).with_egu("deg"));
        let mut ranger = MoverRanger::for_mover(mover);
        ranger.set_range(-0.5, 0.5, 4);

        render(|ui| ranger.ui(ui));

        let (_, start, stop, steps) = ranger.args().unwrap();
        assert_eq!((start, stop, steps), (-0.5, 0.5, 4));
    }
}
