//! The link-type routing table.
//!
//! Maps a link type to the four pipeline-stage addresses that process data
//! for that domain. The table is built once at startup and is immutable
//! afterwards; there is no runtime registration of new link types. Shared
//! `&AddressRegistry` access needs no locking.

use crate::address::{ServiceArea, StageAddress};
use crate::link::{LinkType, Stage};
use fleetlink_common::{Error, Result};
use std::collections::HashMap;

/// Service name of the single collector fronting all domains.
pub const COLLECTOR_SERVICE: &str = "collector";

/// Service name of the targets control service (provisioning).
pub const TARGETS_SERVICE: &str = "targets";

/// Service name of the polling-configuration control service.
pub const POLLING_SERVICE: &str = "polling";

/// Service name of the remote-execution endpoint.
pub const EXEC_SERVICE: &str = "exec";

/// The domain-specific stage addresses for one link type.
///
/// The collector is deliberately absent: collection is link-type-agnostic at
/// the service level, so the registry holds a single collector address for
/// every domain and the collector differentiates internally on the link type
/// carried in the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingEntry {
    pub parser: StageAddress,
    pub cache: StageAddress,
    pub persist: StageAddress,
}

/// Immutable routing table from link type to stage addresses.
///
/// Construct once (normally via [`AddressRegistry::builtin`]) and pass by
/// reference to everything that dispatches; never a mutable global.
#[derive(Debug, Clone)]
pub struct AddressRegistry {
    collector: StageAddress,
    entries: HashMap<LinkType, RoutingEntry>,
}

impl AddressRegistry {
    /// Build a registry with an explicit collector address and entries.
    pub fn new(collector: StageAddress, entries: HashMap<LinkType, RoutingEntry>) -> Self {
        AddressRegistry { collector, entries }
    }

    /// The registry for the two built-in domains.
    ///
    /// The network-device pipeline lives in the default area, the cluster
    /// pipeline in the cluster area.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            LinkType::network_device(),
            RoutingEntry {
                parser: StageAddress::new("device-parser", ServiceArea::Default),
                cache: StageAddress::new("device-cache", ServiceArea::Default),
                persist: StageAddress::new("device-store", ServiceArea::Default),
            },
        );
        entries.insert(
            LinkType::k8s_cluster(),
            RoutingEntry {
                parser: StageAddress::new("cluster-parser", ServiceArea::Cluster),
                cache: StageAddress::new("cluster-cache", ServiceArea::Cluster),
                persist: StageAddress::new("cluster-store", ServiceArea::Cluster),
            },
        );
        AddressRegistry {
            collector: StageAddress::new(COLLECTOR_SERVICE, ServiceArea::Default),
            entries,
        }
    }

    /// Resolve the address of one stage for a link type.
    ///
    /// Pure lookup, no side effects. The collector stage resolves to the
    /// same address for every link type. The other stages resolve to the
    /// unresolved address for unknown link types; callers must treat that
    /// as a configuration error, never dispatch to it or silently skip the
    /// stage.
    pub fn resolve(&self, link: &LinkType, stage: Stage) -> StageAddress {
        if stage == Stage::Collector {
            return self.collector.clone();
        }
        match self.entries.get(link) {
            Some(entry) => match stage {
                Stage::Collector => unreachable!(),
                Stage::Parser => entry.parser.clone(),
                Stage::Cache => entry.cache.clone(),
                Stage::Persist => entry.persist.clone(),
            },
            None => StageAddress::unresolved(),
        }
    }

    /// Resolve like [`resolve`](Self::resolve) but turn a lookup miss into
    /// a configuration error.
    pub fn require(&self, link: &LinkType, stage: Stage) -> Result<StageAddress> {
        let addr = self.resolve(link, stage);
        if addr.is_resolved() {
            Ok(addr)
        } else {
            Err(Error::Config(format!(
                "no {} route for link type {}",
                stage, link
            )))
        }
    }

    /// Link types known to this registry, sorted for stable output.
    pub fn link_types(&self) -> Vec<&LinkType> {
        let mut links: Vec<&LinkType> = self.entries.keys().collect();
        links.sort();
        links
    }

    /// The targets control address for a given area.
    ///
    /// Per-item operations use [`ServiceArea::Default`]; bulk submission
    /// uses [`ServiceArea::Bulk`].
    pub fn targets_control(area: ServiceArea) -> StageAddress {
        StageAddress::new(TARGETS_SERVICE, area)
    }

    /// The polling-configuration control address.
    pub fn polling_control() -> StageAddress {
        StageAddress::new(POLLING_SERVICE, ServiceArea::Default)
    }

    /// The remote-execution address, conventionally `"<area>/exec"`.
    pub fn exec(area: ServiceArea) -> StageAddress {
        StageAddress::new(EXEC_SERVICE, area)
    }
}

impl Default for AddressRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_is_link_type_independent() {
        let registry = AddressRegistry::builtin();
        let netdev = registry.resolve(&LinkType::network_device(), Stage::Collector);
        let k8s = registry.resolve(&LinkType::k8s_cluster(), Stage::Collector);
        let unknown = registry.resolve(&LinkType::new("no-such-domain"), Stage::Collector);

        assert_eq!(netdev, k8s);
        assert_eq!(netdev, unknown);
        assert_eq!(netdev.service(), COLLECTOR_SERVICE);
    }

    #[test]
    fn test_known_link_types_resolve_all_stages() {
        let registry = AddressRegistry::builtin();
        for link in [LinkType::network_device(), LinkType::k8s_cluster()] {
            for stage in Stage::ALL {
                let addr = registry.resolve(&link, stage);
                assert!(addr.is_resolved(), "{} {} unresolved", link, stage);
            }
        }
    }

    #[test]
    fn test_domain_specific_stages_differ_between_domains() {
        let registry = AddressRegistry::builtin();
        let netdev = LinkType::network_device();
        let k8s = LinkType::k8s_cluster();

        assert_ne!(
            registry.resolve(&netdev, Stage::Parser),
            registry.resolve(&k8s, Stage::Parser)
        );
        assert_eq!(
            registry.resolve(&k8s, Stage::Cache).area(),
            ServiceArea::Cluster
        );
    }

    #[test]
    fn test_unknown_link_type_is_unresolved() {
        let registry = AddressRegistry::builtin();
        let unknown = LinkType::new("storage-array");

        for stage in [Stage::Parser, Stage::Cache, Stage::Persist] {
            assert!(!registry.resolve(&unknown, stage).is_resolved());
        }
        let err = registry.require(&unknown, Stage::Parser).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_well_known_control_addresses() {
        assert_eq!(
            AddressRegistry::targets_control(ServiceArea::Bulk).route(),
            "91/targets"
        );
        assert_eq!(AddressRegistry::polling_control().route(), "0/polling");
        assert_eq!(AddressRegistry::exec(ServiceArea::Default).route(), "0/exec");
    }
}
