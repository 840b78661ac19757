//! Collapsible name/kind tree of a device hierarchy.

use daq_forms::tree::{DeviceNode, DeviceTreeView};

use super::FormWidget;

impl FormWidget for DeviceTreeView {
    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Name");
            ui.add_space(40.0);
            ui.strong("Kind");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("⟳").on_hover_text("Rebuild tree").clicked() {
                    self.refresh();
                }
            });
        });
        ui.separator();

        match self.root() {
            Some(root) => node_ui(ui, root, &root.name),
            None => {
                ui.weak("No device selected");
            }
        }
    }
}

fn node_ui(ui: &mut egui::Ui, node: &DeviceNode, path: &str) {
    if node.is_leaf() {
        ui.horizontal(|ui| {
            ui.label(&node.name);
            ui.weak(node.kind.to_string());
        });
        return;
    }
    egui::CollapsingHeader::new(format!("{}  ({})", node.name, node.kind))
        .id_salt(path)
        .default_open(true)
        .show(ui, |ui| {
            for child in &node.children {
                node_ui(ui, child, &format!("{path}.{}", child.name));
            }
        });
}
