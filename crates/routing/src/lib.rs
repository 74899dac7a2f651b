//! Link-based service routing for fleetlink.
//!
//! This crate holds the leaf of the dependency tree: the mapping from a
//! symbolic link type to the pipeline-stage services that process that
//! domain's data, and the addressing vocabulary (areas, stage addresses)
//! shared by every dispatching component.

pub mod address;
pub mod link;
pub mod registry;

pub use address::{ServiceArea, StageAddress};
pub use link::{LinkType, Stage};
pub use registry::{
    AddressRegistry, RoutingEntry, COLLECTOR_SERVICE, EXEC_SERVICE, POLLING_SERVICE,
    TARGETS_SERVICE,
};
