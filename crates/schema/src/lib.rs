//! Schema definitions for fleetlink.
//!
//! This crate defines the wire-facing data model: targets with their hosts
//! and protocol configs, the builders that construct well-formed targets,
//! remote jobs, and the polling-configuration catalogue.

pub mod builders;
pub mod job;
pub mod polling;
pub mod target;

pub use builders::{cluster_target, device_target, CLUSTER_CRED_ID, SSH_TERMINAL};
pub use job::{Job, JobResource};
pub use polling::{builtin_polling_configs, Poll, PollingConfig};
pub use target::{
    Ack, Host, HostProtocol, InventoryType, Protocol, Target, TargetList, TargetState,
};
