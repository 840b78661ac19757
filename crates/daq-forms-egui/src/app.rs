//! Main application state and UI logic.

use std::sync::Arc;

use daq_forms::config::FormsConfig;
use daq_forms::control::{ControlSurface, PlanQueue};
use daq_forms::devices::Device;
use daq_forms::panel::{AxisScanPanel, CountScanPanel};
use daq_forms::plans::{count, scan, PlanInvocation};
use daq_forms::tabs::ScanTabs;
use daq_forms::tree::DeviceTreeView;
use eframe::egui;
use tracing::info;

use crate::panels::{control_surface_ui, RunOutcome};
use crate::widgets::FormWidget;

/// Scan tabs on the left, device tree on the right, status line at the
/// bottom.
pub struct FormsApp {
    title: String,
    surface: ControlSurface<PlanInvocation>,
    devices: Vec<Arc<dyn Device>>,
    selected_device: usize,
    tree: DeviceTreeView,
    status: Option<String>,
}

impl FormsApp {
    /// Build the tabs described by `config`, running plans into `queue`.
    pub fn new(config: &FormsConfig, queue: impl PlanQueue<PlanInvocation> + 'static) -> Self {
        let devices = config.device_refs();
        let tree = devices
            .first()
            .cloned()
            .map(DeviceTreeView::new)
            .unwrap_or_default();
        info!(
            movers = config.movers.len(),
            detectors = config.detectors.len(),
            devices = devices.len(),
            "building scan forms"
        );
        Self {
            title: config.ui.title.clone(),
            surface: ControlSurface::new(queue, build_tabs(config)),
            devices,
            selected_device: 0,
            tree,
            status: None,
        }
    }

    /// Control surface, for driving the forms without a window.
    pub fn surface_mut(&mut self) -> &mut ControlSurface<PlanInvocation> {
        &mut self.surface
    }

    /// Last status line.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Show device `index` in the tree. Out-of-range indices are ignored.
    pub fn select_device(&mut self, index: usize) {
        if let Some(device) = self.devices.get(index) {
            self.selected_device = index;
            self.tree.set_object(Arc::clone(device));
        }
    }

    /// Draw one frame.
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.heading(&self.title);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            match &self.status {
                Some(status) => ui.label(status),
                None => ui.weak("Ready"),
            };
        });

        egui::SidePanel::right("device_tree")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.device_tree_ui(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(outcome) = control_surface_ui(ui, &mut self.surface) {
                self.status = Some(match outcome {
                    RunOutcome::Queued => "Plan queued".to_string(),
                    RunOutcome::NothingToRun => "Nothing to run: select a motor".to_string(),
                });
            }
        });
    }

    fn device_tree_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Devices");
        if self.devices.is_empty() {
            ui.weak("No devices configured");
            return;
        }

        let mut selected = self.selected_device;
        let current = self.devices.get(selected).map(|d| d.name().to_string()).unwrap_or_default();
        egui::ComboBox::from_id_salt("device_select")
            .selected_text(current)
            .show_ui(ui, |ui| {
                for (index, device) in self.devices.iter().enumerate() {
                    ui.selectable_value(&mut selected, index, device.name());
                }
            });
        if selected != self.selected_device {
            self.select_device(selected);
        }

        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| self.tree.ui(ui));
    }
}

impl eframe::App for FormsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

/// Scan and Count tabs over the configured instruments.
#[must_use]
pub fn build_tabs(config: &FormsConfig) -> ScanTabs<PlanInvocation> {
    let mut axis = AxisScanPanel::new(scan, config.mover_refs(), config.detector_refs())
        .with_default_steps(config.scan.default_steps);
    let mut counter =
        CountScanPanel::with_max_count(count, config.detector_refs(), config.count.max_count)
            .with_label_layout(config.ui.label_layout);
    if config.ui.metadata_editor {
        axis = axis.with_metadata();
        counter = counter.with_metadata();
    }
    ScanTabs::new().with_tab("Scan", axis).with_tab("Count", counter)
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::demo::fill_demo_instruments;

    fn demo_config() -> FormsConfig {
        let mut config = FormsConfig::default();
        fill_demo_instruments(&mut config);
        config
    }

    #[test]
    fn test_tabs_follow_config() {
        let mut config = demo_config();
        config.ui.metadata_editor = false;
        let tabs = build_tabs(&config);
        assert_eq!(tabs.titles(), vec!["Scan", "Count"]);
        assert!(tabs.current().unwrap().panel.metadata().is_none());
    }

    #[test]
    fn test_frame_renders_and_run_reaches_queue() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = FormsApp::new(&demo_config(), tx);

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.show(ctx));

        assert!(app.surface_mut().run());
        let plan = rx.try_recv().unwrap();
        assert_eq!(plan.mover_names(), vec!["th".to_string()]);
        assert_eq!(plan.num_points(), 10);
    }

    #[test]
    fn test_select_device_ignores_unknown_index() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = FormsApp::new(&demo_config(), tx);
        app.select_device(7);
        assert_eq!(app.tree.root().unwrap().name, "sample_stage");
    }
}
