//! Link type and pipeline stage definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbolic identifier for a management domain.
///
/// A link type is an opaque lookup key: it names the domain a target belongs
/// to (physical network devices, container-orchestration clusters) and
/// determines which pipeline stages process that domain's data. It has no
/// internal structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkType(String);

impl LinkType {
    /// Create a link type from an arbitrary identifier.
    pub fn new(id: impl Into<String>) -> Self {
        LinkType(id.into())
    }

    /// The built-in network-device domain.
    pub fn network_device() -> Self {
        LinkType("network-device".to_string())
    }

    /// The built-in cluster-orchestration domain.
    pub fn k8s_cluster() -> Self {
        LinkType("k8s-cluster".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the four pipeline roles that process data for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Collector,
    Parser,
    Cache,
    Persist,
}

impl Stage {
    /// All stages, in pipeline order.
    pub const ALL: [Stage; 4] = [Stage::Collector, Stage::Parser, Stage::Cache, Stage::Persist];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Collector => write!(f, "collector"),
            Stage::Parser => write!(f, "parser"),
            Stage::Cache => write!(f, "cache"),
            Stage::Persist => write!(f, "persist"),
        }
    }
}

impl FromStr for Stage {
    type Err = fleetlink_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "collector" => Ok(Stage::Collector),
            "parser" => Ok(Stage::Parser),
            "cache" => Ok(Stage::Cache),
            "persist" => Ok(Stage::Persist),
            _ => Err(fleetlink_common::Error::Config(format!(
                "unknown pipeline stage: {}",
                s
            ))),
        }
    }
}
