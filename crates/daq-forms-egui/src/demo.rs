//! Simulated instruments used when the configuration names none.

use daq_forms::config::FormsConfig;
use daq_forms::devices::Kind;
use daq_forms::sim::{SimDetector, SimDevice, SimMover};
use tracing::info;

/// Fill empty mover, detector and device lists with a small simulated
/// beamline. Lists the configuration already provides are left alone.
pub fn fill_demo_instruments(config: &mut FormsConfig) {
    if config.movers.is_empty() {
        info!("no movers configured; using simulated movers");
        config.movers = vec![
            SimMover::new("th").with_limits(-10.0, 10.0).with_egu("deg"),
            SimMover::new("tth").with_limits(-20.0, 120.0).with_egu("deg"),
            SimMover::new("x").with_egu("mm"),
        ];
    }
    if config.detectors.is_empty() {
        info!("no detectors configured; using simulated detectors");
        config.detectors = ["I0", "It", "If"].into_iter().map(SimDetector::new).collect();
    }
    if config.devices.is_empty() {
        config.devices = vec![sample_stage()];
    }
}

fn sample_stage() -> SimDevice {
    let temperature = SimDevice::signal("sample_stage_temperature", Kind::Normal)
        .with_component(
            "setpoint",
            SimDevice::signal("sample_stage_temperature_setpoint", Kind::Config),
        )
        .with_component(
            "readback",
            SimDevice::signal("sample_stage_temperature_readback", Kind::Hinted),
        );
    SimDevice::signal("sample_stage", Kind::Normal)
        .with_component("x", SimDevice::signal("sample_stage_x", Kind::Hinted))
        .with_component("y", SimDevice::signal("sample_stage_y", Kind::Normal))
        .with_component("temperature", temperature)
}

#[cfg(test)]
mod tests {
    use daq_forms::tree::DeviceNode;

    use super::*;

    #[test]
    fn test_fills_only_empty_lists() {
        let mut config = FormsConfig::default();
        config.detectors = vec![SimDetector::new("diode")];
        fill_demo_instruments(&mut config);

        assert_eq!(config.movers.len(), 3);
        assert_eq!(config.detectors.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_demo_device_tree() {
        let mut config = FormsConfig::default();
        fill_demo_instruments(&mut config);
        let devices = config.device_refs();
        let tree = DeviceNode::build(devices[0].as_ref());
        assert_eq!(tree.name, "sample_stage");
        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.len(), 6);
    }
}
