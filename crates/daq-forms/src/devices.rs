//! Capability traits for the instruments the forms talk about.
//!
//! Forms never own instruments. They hold `Arc` references and only query the
//! capabilities they need: a name, optional soft limits and an optional
//! engineering unit for movers, a name for detectors, and the component
//! hierarchy for the device tree viewer.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Soft travel limits of a mover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Lower bound
    pub low: f64,
    /// Upper bound
    pub high: f64,
}

impl Limits {
    /// Create a limit pair.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Control systems report `(0, 0)` for "no limits".
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.low == 0.0 && self.high == 0.0
    }

    /// The limits if they actually constrain motion.
    #[must_use]
    pub fn bounded(self) -> Option<Limits> {
        (!self.is_unbounded()).then_some(self)
    }
}

impl From<(f64, f64)> for Limits {
    fn from((low, high): (f64, f64)) -> Self {
        Self { low, high }
    }
}

/// An axis that can be commanded to a position.
pub trait Mover: Send + Sync + fmt::Debug {
    /// Device name as shown in forms and plans.
    fn name(&self) -> &str;

    /// Soft limits, if the mover reports any.
    fn limits(&self) -> Option<Limits> {
        None
    }

    /// Engineering unit of the position, if known.
    fn egu(&self) -> Option<&str> {
        None
    }
}

/// A component producing data when triggered.
pub trait Detector: Send + Sync + fmt::Debug {
    /// Device name as shown in forms and plans.
    fn name(&self) -> &str;
}

/// Shared mover reference.
pub type MoverRef = Arc<dyn Mover>;

/// Shared detector reference.
pub type DetectorRef = Arc<dyn Detector>;

/// How a signal participates in data collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Never read
    Omitted,
    /// Read with every event
    #[default]
    Normal,
    /// Read once per run as configuration
    Config,
    /// Normal and suggested for plotting
    Hinted,
}

impl Kind {
    /// Lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Omitted => "omitted",
            Kind::Normal => "normal",
            Kind::Config => "config",
            Kind::Hinted => "hinted",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind.{}", self.as_str())
    }
}

/// A node of an instrument's component hierarchy.
///
/// Leaf signals report no components. Composite devices list their
/// component names and resolve each one through [`Device::component`].
pub trait Device: Send + Sync + fmt::Debug {
    /// Fully qualified name.
    fn name(&self) -> &str;

    /// Participation kind.
    fn kind(&self) -> Kind;

    /// Component names, in declaration order. Empty for leaves.
    fn component_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Resolve a component by name.
    fn component(&self, _name: &str) -> Option<Arc<dyn Device>> {
        None
    }

    /// Whether the device has sub-components.
    fn is_composite(&self) -> bool {
        !self.component_names().is_empty()
    }
}
