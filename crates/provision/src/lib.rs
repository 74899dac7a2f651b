//! Provisioning flows for fleetlink.
//!
//! Bulk target provisioning, polling-configuration rollout, and ad-hoc
//! remote job execution, all built on the dispatcher. Flows are
//! build-dispatch-report passes with no persisted intermediate state.

pub mod flows;
pub mod presets;

pub use flows::{BulkOutcome, PollingReport, Provisioner};
pub use presets::{DevicePreset, LAB_CLUSTER_ID, SIM_CRED_ID};
