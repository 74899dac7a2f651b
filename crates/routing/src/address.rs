//! Service addressing: areas and stage addresses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tenancy/partition discriminator used when addressing a service.
///
/// The allocation is a closed policy, not an open numeric space: 0 and 1
/// belong to the two built-in pipeline domains, 91 is reserved for
/// bulk/administrative target submission. Any other value on the wire is a
/// decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ServiceArea {
    /// Per-item operations and the device-domain pipeline.
    Default,
    /// The cluster-domain pipeline.
    Cluster,
    /// Bulk/administrative target submission.
    Bulk,
}

impl ServiceArea {
    /// The numeric value carried on the wire.
    pub fn value(self) -> u8 {
        match self {
            ServiceArea::Default => 0,
            ServiceArea::Cluster => 1,
            ServiceArea::Bulk => 91,
        }
    }
}

impl From<ServiceArea> for u8 {
    fn from(area: ServiceArea) -> u8 {
        area.value()
    }
}

impl TryFrom<u8> for ServiceArea {
    type Error = fleetlink_common::Error;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ServiceArea::Default),
            1 => Ok(ServiceArea::Cluster),
            91 => Ok(ServiceArea::Bulk),
            _ => Err(fleetlink_common::Error::Config(format!(
                "unallocated service area: {}",
                v
            ))),
        }
    }
}

impl fmt::Display for ServiceArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// An immutable (service name, service area) pair naming one pipeline-stage
/// or control service.
///
/// An address with an empty service name is "unresolved": it is the lookup
/// miss value and must never be dispatched to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageAddress {
    service: String,
    area: ServiceArea,
}

impl StageAddress {
    /// Create an address for a named service in an area.
    pub fn new(service: impl Into<String>, area: ServiceArea) -> Self {
        StageAddress {
            service: service.into(),
            area,
        }
    }

    /// The unresolved address returned for unknown routing lookups.
    pub fn unresolved() -> Self {
        StageAddress {
            service: String::new(),
            area: ServiceArea::Default,
        }
    }

    /// Whether this address names an actual service.
    pub fn is_resolved(&self) -> bool {
        !self.service.is_empty()
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn area(&self) -> ServiceArea {
        self.area
    }

    /// Render the `"<area>/<service>"` route used by the dispatch boundary.
    pub fn route(&self) -> String {
        format!("{}/{}", self.area.value(), self.service)
    }
}

impl fmt::Display for StageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_resolved() {
            write!(f, "{}", self.route())
        } else {
            write!(f, "<unresolved>")
        }
    }
}
