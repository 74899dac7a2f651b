//! Device provisioning presets.
//!
//! A preset names a fixed topology: the small base lab, the three synthetic
//! sites, or a scale block of up to thirty thousand devices. Expansion is
//! pure and deterministic; all synthetic devices reference the simulator
//! credential.

use fleetlink_common::Result;
use fleetlink_routing::LinkType;
use fleetlink_schema::{cluster_target, device_target, Target};
use std::fmt;
use std::str::FromStr;

/// Credential reference convention for simulated devices.
pub const SIM_CRED_ID: &str = "sim";

/// Cluster id convention for the built-in lab cluster.
pub const LAB_CLUSTER_ID: &str = "lab";

const SITE_SIZE: u32 = 1000;

/// A named provisioning topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePreset {
    /// The 19-device base lab, 10.20.30.1 through 10.20.30.19.
    Base,
    /// The lab k8s cluster target.
    Cluster,
    /// 1000 synthetic devices under 30.20.0.0/16.
    Site1,
    /// 1000 synthetic devices under 40.20.0.0/16.
    Site2,
    /// 1000 synthetic devices under 50.20.0.0/16.
    Site3,
    /// N synthetic devices under 60.50.0.0/16.
    Scale(u32),
    /// Cluster + base + all three sites.
    All,
}

impl DevicePreset {
    /// Expand the preset into its full target list, in memory.
    pub fn expand(&self) -> Result<Vec<Target>> {
        match self {
            DevicePreset::Base => devices((1..=19).map(|i| format!("10.20.30.{i}"))),
            DevicePreset::Cluster => Ok(vec![cluster_target(LAB_CLUSTER_ID)?]),
            DevicePreset::Site1 => devices(subnet_block("30.20", 10, SITE_SIZE)),
            DevicePreset::Site2 => devices(subnet_block("40.20", 10, SITE_SIZE)),
            DevicePreset::Site3 => devices(subnet_block("50.20", 10, SITE_SIZE)),
            DevicePreset::Scale(count) => devices(subnet_block("60.50", 40, *count)),
            DevicePreset::All => {
                let mut targets = DevicePreset::Cluster.expand()?;
                targets.extend(DevicePreset::Base.expand()?);
                targets.extend(DevicePreset::Site1.expand()?);
                targets.extend(DevicePreset::Site2.expand()?);
                targets.extend(DevicePreset::Site3.expand()?);
                Ok(targets)
            }
        }
    }
}

impl fmt::Display for DevicePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevicePreset::Base => write!(f, "base"),
            DevicePreset::Cluster => write!(f, "cluster"),
            DevicePreset::Site1 => write!(f, "site1"),
            DevicePreset::Site2 => write!(f, "site2"),
            DevicePreset::Site3 => write!(f, "site3"),
            DevicePreset::Scale(n) => write!(f, "{n}"),
            DevicePreset::All => write!(f, "all"),
        }
    }
}

impl FromStr for DevicePreset {
    type Err = fleetlink_common::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "base" => Ok(DevicePreset::Base),
            "cluster" => Ok(DevicePreset::Cluster),
            "site1" => Ok(DevicePreset::Site1),
            "site2" => Ok(DevicePreset::Site2),
            "site3" => Ok(DevicePreset::Site3),
            "all" => Ok(DevicePreset::All),
            "500" => Ok(DevicePreset::Scale(500)),
            "1k" => Ok(DevicePreset::Scale(1_000)),
            "3k" => Ok(DevicePreset::Scale(3_000)),
            "5k" => Ok(DevicePreset::Scale(5_000)),
            "10k" => Ok(DevicePreset::Scale(10_000)),
            "20k" => Ok(DevicePreset::Scale(20_000)),
            "25k" => Ok(DevicePreset::Scale(25_000)),
            "30k" => Ok(DevicePreset::Scale(30_000)),
            _ => Err(fleetlink_common::Error::Config(format!(
                "unknown device preset: {}",
                s
            ))),
        }
    }
}

fn devices(addrs: impl IntoIterator<Item = String>) -> Result<Vec<Target>> {
    addrs
        .into_iter()
        .map(|addr| device_target(&addr, LinkType::network_device(), SIM_CRED_ID))
        .collect()
}

/// Generate `count` addresses under `<prefix>.<sub>.<ip>`, rolling the
/// third octet when the fourth passes 254.
fn subnet_block(prefix: &str, start_sub: u32, count: u32) -> Vec<String> {
    let mut addrs = Vec::with_capacity(count as usize);
    let mut sub = start_sub;
    let mut ip = 1u32;
    for _ in 0..count {
        addrs.push(format!("{prefix}.{sub}.{ip}"));
        ip += 1;
        if ip > 254 {
            sub += 1;
            ip = 1;
        }
    }
    addrs
}
