//! Common utilities and types shared across fleetlink crates.

pub mod credentials;
pub mod error;
pub mod wire;

pub use credentials::{CredentialProvider, Credentials};
pub use error::{Error, Result};
pub use wire::WirePayload;
