//! Simulated instruments.
//!
//! Lightweight implementations of the capability traits used by the demo
//! control panel and by tests. They carry only the metadata forms need;
//! nothing here moves or reads anything.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::devices::{Detector, Device, Kind, Limits, Mover};
use crate::error::{FormError, Result};

/// A mover with fixed metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimMover {
    /// Device name
    pub name: String,
    /// Soft limits as `[low, high]`; `[0, 0]` means unbounded
    #[serde(default)]
    pub limits: Option<(f64, f64)>,
    /// Engineering unit
    #[serde(default)]
    pub egu: Option<String>,
}

impl SimMover {
    /// A mover without limits or units.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            limits: None,
            egu: None,
        }
    }

    /// Builder: set soft limits.
    #[must_use]
    pub fn with_limits(mut self, low: f64, high: f64) -> Self {
        self.limits = Some((low, high));
        self
    }

    /// Builder: set the engineering unit.
    #[must_use]
    pub fn with_egu(mut self, egu: impl Into<String>) -> Self {
        self.egu = Some(egu.into());
        self
    }

    /// Reject limit pairs with `low > high`.
    pub fn validate(&self) -> Result<()> {
        if let Some((low, high)) = self.limits {
            if low > high {
                return Err(FormError::InvalidDevice {
                    name: self.name.clone(),
                    reason: format!("low limit {} above high limit {}", low, high),
                });
            }
        }
        Ok(())
    }
}

impl Mover for SimMover {
    fn name(&self) -> &str {
        &self.name
    }

    fn limits(&self) -> Option<Limits> {
        self.limits.map(Limits::from)
    }

    fn egu(&self) -> Option<&str> {
        self.egu.as_deref()
    }
}

/// A detector with only a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimDetector {
    /// Device name
    pub name: String,
}

impl SimDetector {
    /// Create a named detector.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Detector for SimDetector {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A device hierarchy described declaratively.
///
/// Component names are local (`"x"`), while [`Device::name`] reports the
/// parent-prefixed name (`"stage_x"`), matching how control-system devices
/// name their signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimDevice {
    /// Fully qualified name
    pub name: String,
    /// Participation kind
    #[serde(default)]
    pub kind: Kind,
    /// Named sub-components
    #[serde(default)]
    pub components: Vec<(String, SimDevice)>,
}

impl SimDevice {
    /// A leaf signal.
    pub fn signal(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            components: Vec::new(),
        }
    }

    /// Builder: attach a component under `attr`.
    #[must_use]
    pub fn with_component(mut self, attr: impl Into<String>, component: SimDevice) -> Self {
        self.components.push((attr.into(), component));
        self
    }
}

impl Device for SimDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> Kind {
        self.kind
    }

    fn component_names(&self) -> Vec<String> {
        self.components.iter().map(|(attr, _)| attr.clone()).collect()
    }

    fn component(&self, name: &str) -> Option<Arc<dyn Device>> {
        self.components
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, dev)| Arc::new(dev.clone()) as Arc<dyn Device>)
    }
}
