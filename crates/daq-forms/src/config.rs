//! Layered configuration for the scan forms.
//!
//! Sources are merged in order: built-in defaults, an optional TOML file,
//! then `DAQ_FORMS_*` environment variables (nested keys split on `__`, e.g.
//! `DAQ_FORMS_COUNT__MAX_COUNT=500`).

use std::path::Path;
use std::sync::Arc;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::devices::{DetectorRef, Device, MoverRef};
use crate::error::Result;
use crate::field::SPIN_LIMIT;
use crate::optional::LabelLayout;
use crate::range::DEFAULT_STEPS;
use crate::sim::{SimDetector, SimDevice, SimMover};

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "DAQ_FORMS_";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormsConfig {
    /// Window and layout settings
    pub ui: UiSettings,
    /// Counting panel settings
    pub count: CountSettings,
    /// Axis scan panel settings
    pub scan: ScanSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// Simulated movers offered by the panels
    pub movers: Vec<SimMover>,
    /// Simulated detectors offered by the panels
    pub detectors: Vec<SimDetector>,
    /// Device hierarchies for the tree viewer
    pub devices: Vec<SimDevice>,
}

/// Window and layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Window title
    pub title: String,
    /// Initial window size `[width, height]`
    pub window_size: [f32; 2],
    /// Placement of field labels
    pub label_layout: LabelLayout,
    /// Attach a metadata editor to each scan panel
    pub metadata_editor: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: "Scan Forms".to_string(),
            window_size: [900.0, 650.0],
            label_layout: LabelLayout::Horizontal,
            metadata_editor: true,
        }
    }
}

/// Counting panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountSettings {
    /// Upper bound of the repeat count
    pub max_count: i64,
}

impl Default for CountSettings {
    fn default() -> Self {
        Self {
            max_count: SPIN_LIMIT,
        }
    }
}

/// Axis scan panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Steps shown for a newly bound mover
    pub default_steps: i64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            default_steps: DEFAULT_STEPS,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl FormsConfig {
    /// Figment with defaults, the optional file and environment overrides.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(FormsConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: FormsConfig = Self::figment(path).extract()?;
        config.validate()?;
        debug!(
            movers = config.movers.len(),
            detectors = config.detectors.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Parse from a TOML string (no environment overrides).
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: FormsConfig = Figment::from(Serialized::defaults(FormsConfig::default()))
            .merge(Toml::string(toml))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic checks that deserialization cannot express.
    pub fn validate(&self) -> Result<()> {
        for mover in &self.movers {
            mover.validate()?;
        }
        Ok(())
    }

    /// Configured movers as shared references.
    #[must_use]
    pub fn mover_refs(&self) -> Vec<MoverRef> {
        self.movers
            .iter()
            .map(|m| Arc::new(m.clone()) as MoverRef)
            .collect()
    }

    /// Configured detectors as shared references.
    #[must_use]
    pub fn detector_refs(&self) -> Vec<DetectorRef> {
        self.detectors
            .iter()
            .map(|d| Arc::new(d.clone()) as DetectorRef)
            .collect()
    }

    /// Configured device hierarchies as shared references.
    #[must_use]
    pub fn device_refs(&self) -> Vec<Arc<dyn Device>> {
        self.devices
            .iter()
            .map(|d| Arc::new(d.clone()) as Arc<dyn Device>)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::devices::Kind;
    use crate::error::FormError;

    #[test]
    fn test_defaults() {
        let config = FormsConfig::default();
        assert_eq!(config.count.max_count, 1 << 16);
        assert_eq!(config.scan.default_steps, 10);
        assert_eq!(config.ui.label_layout, LabelLayout::Horizontal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_instruments() {
        let config = FormsConfig::from_toml_str(
            r#"
            [ui]
            label_layout = "vertical"

            [count]
            max_count = 500

            [[movers]]
            name = "th"
            limits = [-10.0, 10.0]
            egu = "deg"

            [[movers]]
            name = "x"

            [[detectors]]
            name = "I0"

            [[devices]]
            name = "stage"
            components = [["x", { name = "stage_x", kind = "hinted" }]]
            "#,
        )
        .unwrap();

        assert_eq!(config.ui.label_layout, LabelLayout::Vertical);
        assert_eq!(config.count.max_count, 500);
        assert_eq!(config.movers.len(), 2);
        assert_eq!(config.movers[0].limits, Some((-10.0, 10.0)));
        assert_eq!(config.movers[1].limits, None);
        assert_eq!(config.detector_refs()[0].name(), "I0");
        assert_eq!(config.devices[0].components[0].1.kind, Kind::Hinted);
        assert_eq!(config.device_refs()[0].component_names(), vec!["x".to_string()]);
    }

    #[test]
    fn test_invalid_label_layout_rejected() {
        let result = FormsConfig::from_toml_str("[ui]\nlabel_layout = \"diagonal\"\n");
        assert!(matches!(result, Err(FormError::Config(_))));
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let result = FormsConfig::from_toml_str("[[movers]]\nname = \"m\"\nlimits = [5.0, 1.0]\n");
        assert!(matches!(result, Err(FormError::InvalidDevice { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\ndefault_steps = 21").unwrap();

        let config = FormsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.scan.default_steps, 21);
        assert_eq!(config.ui.title, "Scan Forms");
    }

    #[test]
    fn test_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("forms.toml", "[count]\nmax_count = 10\n")?;
            jail.set_env("DAQ_FORMS_COUNT__MAX_COUNT", "25");

            let config: FormsConfig =
                FormsConfig::figment(Some(Path::new("forms.toml"))).extract()?;
            assert_eq!(config.count.max_count, 25);
            Ok(())
        });
    }
}
