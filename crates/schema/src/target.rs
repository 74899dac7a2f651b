//! Target, host and protocol-config data model.
//!
//! A target is one manageable endpoint. It owns one or more hosts (a
//! physical device is its own single host; a cluster may fan out later),
//! and each host carries one protocol config per access method, so a single
//! endpoint can be collected over several protocols concurrently.

use fleetlink_common::WirePayload;
use fleetlink_routing::LinkType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Access protocol for one host config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Ssh,
    #[serde(rename = "snmpv2")]
    SnmpV2,
    Kubectl,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Ssh => write!(f, "ssh"),
            Protocol::SnmpV2 => write!(f, "snmpv2"),
            Protocol::Kubectl => write!(f, "kubectl"),
        }
    }
}

impl FromStr for Protocol {
    type Err = fleetlink_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ssh" => Ok(Protocol::Ssh),
            "snmpv2" | "snmp" => Ok(Protocol::SnmpV2),
            "kubectl" => Ok(Protocol::Kubectl),
            _ => Err(fleetlink_common::Error::Config(format!(
                "unknown protocol: {}",
                s
            ))),
        }
    }
}

/// What kind of endpoint a target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventoryType {
    NetworkDevice,
    K8sCluster,
}

/// Collection state of a target. Targets start down and are marked up by
/// the pipeline after the first successful collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    Up,
    #[default]
    Down,
}

/// One access method for a host.
///
/// `cred_id` is a reference resolved by an external credential provider;
/// the secret itself never appears in this model or on this wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProtocol {
    pub protocol: Protocol,
    pub addr: String,
    pub port: u16,
    /// Timeout for the downstream collection protocol, in seconds. Not the
    /// dispatch-call timeout.
    pub timeout_secs: u64,
    pub cred_id: String,
    /// Terminal type, SSH only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
}

/// One physically or logically addressable element within a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub host_id: String,
    /// One config per protocol; a host may carry several protocols at once.
    pub configs: BTreeMap<Protocol, HostProtocol>,
}

/// A manageable endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Unique key within the target namespace.
    pub target_id: String,
    /// Determines routing through the pipeline stages.
    pub links_id: LinkType,
    pub inventory_type: InventoryType,
    #[serde(default)]
    pub state: TargetState,
    /// Keyed by host id; every target has at least one host, and for a
    /// single-host domain the key equals the target id.
    pub hosts: BTreeMap<String, Host>,
}

impl WirePayload for Target {
    const PAYLOAD_TYPE: &'static str = "target";
}

/// Bulk payload carrying a batch of targets in one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetList {
    pub list: Vec<Target>,
}

impl TargetList {
    pub fn new(list: Vec<Target>) -> Self {
        TargetList { list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl WirePayload for TargetList {
    const PAYLOAD_TYPE: &'static str = "target-list";
}

/// Generic acknowledgement returned by the control services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// How many items the remote accepted.
    #[serde(default)]
    pub accepted: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WirePayload for Ack {
    const PAYLOAD_TYPE: &'static str = "ack";
}
