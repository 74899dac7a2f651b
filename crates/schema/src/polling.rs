//! Polling-configuration definitions.
//!
//! A polling config tells the collector what to fetch from targets of one
//! domain and how often. The built-in catalogue carries one definition per
//! device family plus one for the cluster domain; provisioning submits each
//! definition individually to the polling control service.

use crate::target::Protocol;
use fleetlink_common::WirePayload;
use fleetlink_routing::LinkType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One thing the collector fetches on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// What to fetch: an SNMP OID, a CLI command, or a kubectl query.
    pub what: String,
    pub protocol: Protocol,
    pub cadence_secs: u64,
    pub timeout_secs: u64,
}

/// A named set of polls for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    pub name: String,
    pub links_id: LinkType,
    pub polls: BTreeMap<String, Poll>,
}

impl WirePayload for PollingConfig {
    const PAYLOAD_TYPE: &'static str = "polling-config";
}

fn snmp_poll(oid: &str, cadence_secs: u64) -> Poll {
    Poll {
        what: oid.to_string(),
        protocol: Protocol::SnmpV2,
        cadence_secs,
        timeout_secs: 60,
    }
}

/// The built-in polling catalogue.
///
/// Deterministic: same content and order on every call.
pub fn builtin_polling_configs() -> Vec<PollingConfig> {
    let mut configs = Vec::new();

    // Generic SNMP system group, all device families.
    let mut polls = BTreeMap::new();
    polls.insert("system".to_string(), snmp_poll("1.3.6.1.2.1.1", 300));
    polls.insert("location".to_string(), snmp_poll("1.3.6.1.2.1.1.6", 3600));
    configs.push(PollingConfig {
        name: "device-system".to_string(),
        links_id: LinkType::network_device(),
        polls,
    });

    // SNMP interface table.
    let mut polls = BTreeMap::new();
    polls.insert("if-table".to_string(), snmp_poll("1.3.6.1.2.1.2.2", 300));
    polls.insert(
        "if-x-table".to_string(),
        snmp_poll("1.3.6.1.2.1.31.1.1", 300),
    );
    configs.push(PollingConfig {
        name: "device-interfaces".to_string(),
        links_id: LinkType::network_device(),
        polls,
    });

    // CLI inventory over SSH.
    let mut polls = BTreeMap::new();
    polls.insert(
        "version".to_string(),
        Poll {
            what: "show version".to_string(),
            protocol: Protocol::Ssh,
            cadence_secs: 3600,
            timeout_secs: 60,
        },
    );
    polls.insert(
        "inventory".to_string(),
        Poll {
            what: "show inventory".to_string(),
            protocol: Protocol::Ssh,
            cadence_secs: 3600,
            timeout_secs: 60,
        },
    );
    configs.push(PollingConfig {
        name: "device-cli-inventory".to_string(),
        links_id: LinkType::network_device(),
        polls,
    });

    // Cluster domain inventory via kubectl.
    let mut polls = BTreeMap::new();
    for (name, what) in [
        ("nodes", "get nodes -o json"),
        ("pods", "get pods -A -o json"),
        ("deployments", "get deployments -A -o json"),
        ("services", "get services -A -o json"),
    ] {
        polls.insert(
            name.to_string(),
            Poll {
                what: what.to_string(),
                protocol: Protocol::Kubectl,
                cadence_secs: 300,
                timeout_secs: 60,
            },
        );
    }
    configs.push(PollingConfig {
        name: "cluster-inventory".to_string(),
        links_id: LinkType::k8s_cluster(),
        polls,
    });

    configs
}
