//! Target builders.
//!
//! Pure data constructors: no I/O, no clock, no randomness. Calling a
//! builder twice with the same inputs yields structurally equal targets.

use crate::target::{Host, HostProtocol, InventoryType, Protocol, Target, TargetState};
use fleetlink_common::{Error, Result};
use fleetlink_routing::LinkType;
use std::collections::BTreeMap;

/// Credential reference convention for the built-in lab cluster.
pub const CLUSTER_CRED_ID: &str = "lab";

/// Fixed terminal type for device SSH sessions.
pub const SSH_TERMINAL: &str = "vt100";

const SSH_PORT: u16 = 22;
const SNMP_PORT: u16 = 161;
const PROTOCOL_TIMEOUT_SECS: u64 = 60;

/// Build a network-device target.
///
/// The device is keyed by its address, starts in the down state, and
/// carries two protocol configs on its single host: SSH and SNMPv2, both
/// referencing the same credential. The collector polls a device over both
/// protocols independently so it can fall back or combine results; both
/// must be present.
pub fn device_target(addr: &str, links_id: LinkType, cred_id: &str) -> Result<Target> {
    if addr.is_empty() {
        return Err(Error::Config("empty device address".to_string()));
    }
    if cred_id.is_empty() {
        return Err(Error::Config("empty credential id".to_string()));
    }

    let mut configs = BTreeMap::new();
    configs.insert(
        Protocol::Ssh,
        HostProtocol {
            protocol: Protocol::Ssh,
            addr: addr.to_string(),
            port: SSH_PORT,
            timeout_secs: PROTOCOL_TIMEOUT_SECS,
            cred_id: cred_id.to_string(),
            terminal: Some(SSH_TERMINAL.to_string()),
        },
    );
    configs.insert(
        Protocol::SnmpV2,
        HostProtocol {
            protocol: Protocol::SnmpV2,
            addr: addr.to_string(),
            port: SNMP_PORT,
            timeout_secs: PROTOCOL_TIMEOUT_SECS,
            cred_id: cred_id.to_string(),
            terminal: None,
        },
    );

    let mut hosts = BTreeMap::new();
    hosts.insert(
        addr.to_string(),
        Host {
            host_id: addr.to_string(),
            configs,
        },
    );

    Ok(Target {
        target_id: addr.to_string(),
        links_id,
        inventory_type: InventoryType::NetworkDevice,
        state: TargetState::Down,
        hosts,
    })
}

/// Build a k8s-cluster target.
///
/// One host keyed by the cluster id with a single Kubectl config
/// referencing the fixed lab credential convention.
pub fn cluster_target(cluster_id: &str) -> Result<Target> {
    if cluster_id.is_empty() {
        return Err(Error::Config("empty cluster id".to_string()));
    }

    let mut configs = BTreeMap::new();
    configs.insert(
        Protocol::Kubectl,
        HostProtocol {
            protocol: Protocol::Kubectl,
            addr: cluster_id.to_string(),
            port: 0,
            timeout_secs: PROTOCOL_TIMEOUT_SECS,
            cred_id: CLUSTER_CRED_ID.to_string(),
            terminal: None,
        },
    );

    let mut hosts = BTreeMap::new();
    hosts.insert(
        cluster_id.to_string(),
        Host {
            host_id: cluster_id.to_string(),
            configs,
        },
    );

    Ok(Target {
        target_id: cluster_id.to_string(),
        links_id: LinkType::k8s_cluster(),
        inventory_type: InventoryType::K8sCluster,
        state: TargetState::Down,
        hosts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_device_target_shape() {
        let device =
            device_target("10.20.30.1", LinkType::network_device(), "sim").unwrap();

        assert_eq!(device.target_id, "10.20.30.1");
        assert_eq!(device.links_id, LinkType::network_device());
        assert_eq!(device.inventory_type, InventoryType::NetworkDevice);
        assert_eq!(device.state, TargetState::Down);

        // Single-host domain: the host key equals the target id.
        assert_eq!(device.hosts.len(), 1);
        let host = device.hosts.get("10.20.30.1").unwrap();
        assert_eq!(host.host_id, device.target_id);

        // Exactly two configs keyed by distinct protocols, sharing the cred.
        assert_eq!(host.configs.len(), 2);
        let ssh = host.configs.get(&Protocol::Ssh).unwrap();
        assert_eq!(ssh.port, 22);
        assert_eq!(ssh.terminal.as_deref(), Some("vt100"));
        assert_eq!(ssh.timeout_secs, 60);
        assert_eq!(ssh.cred_id, "sim");

        let snmp = host.configs.get(&Protocol::SnmpV2).unwrap();
        assert_eq!(snmp.port, 161);
        assert_eq!(snmp.timeout_secs, 60);
        assert_eq!(snmp.cred_id, "sim");
        assert!(snmp.terminal.is_none());
    }

    #[test]
    fn test_cluster_target_shape() {
        let cluster = cluster_target("lab").unwrap();

        assert_eq!(cluster.target_id, "lab");
        assert_eq!(cluster.links_id, LinkType::k8s_cluster());
        assert_eq!(cluster.inventory_type, InventoryType::K8sCluster);

        assert_eq!(cluster.hosts.len(), 1);
        let host = cluster.hosts.get("lab").unwrap();
        assert_eq!(host.configs.len(), 1);
        let kubectl = host.configs.get(&Protocol::Kubectl).unwrap();
        assert_eq!(kubectl.cred_id, CLUSTER_CRED_ID);
    }

    #[test]
    fn test_builders_are_deterministic() {
        let a = device_target("10.0.0.1", LinkType::network_device(), "sim").unwrap();
        let b = device_target("10.0.0.1", LinkType::network_device(), "sim").unwrap();
        assert_eq!(a, b);

        let c = cluster_target("lab").unwrap();
        let d = cluster_target("lab").unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn test_empty_inputs_rejected() {
        assert!(device_target("", LinkType::network_device(), "sim")
            .unwrap_err()
            .is_config());
        assert!(device_target("10.0.0.1", LinkType::network_device(), "")
            .unwrap_err()
            .is_config());
        assert!(cluster_target("").unwrap_err().is_config());
    }
}
