//! Tab strip, visible panel and Run button.

use daq_forms::control::ControlSurface;

use super::scan_panel_ui;

/// What a click on Run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A plan was handed to the queue
    Queued,
    /// The visible panel could not build a plan
    NothingToRun,
}

/// Draw the control surface. Returns the outcome when Run was clicked this
/// frame.
pub fn control_surface_ui<P>(ui: &mut egui::Ui, surface: &mut ControlSurface<P>) -> Option<RunOutcome> {
    let titles: Vec<String> = surface.tabs().titles().into_iter().map(str::to_string).collect();
    let current = surface.tabs().current_index();

    ui.horizontal(|ui| {
        for (index, title) in titles.iter().enumerate() {
            if ui.selectable_label(index == current, title).clicked() {
                surface.tabs_mut().set_current(index);
            }
        }
    });
    ui.separator();

    match surface.tabs_mut().current_mut() {
        Some(tab) => {
            egui::ScrollArea::vertical()
                .auto_shrink([false, true])
                .max_height(ui.available_height() - 40.0)
                .show(ui, |ui| scan_panel_ui::<P, _>(ui, tab.panel.as_mut()));
        }
        None => {
            ui.weak("No scan panels configured");
        }
    }

    ui.separator();
    let clicked = ui
        .add_enabled(!surface.tabs().is_empty(), egui::Button::new("▶ Run"))
        .on_hover_text("Queue the plan of the visible tab")
        .clicked();
    clicked.then(|| {
        if surface.run() {
            RunOutcome::Queued
        } else {
            RunOutcome::NothingToRun
        }
    })
}
