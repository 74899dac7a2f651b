//! Common error types for fleetlink.

use thiserror::Error;

/// Common error type for fleetlink operations.
///
/// The four dispatch-facing variants map one-to-one onto how a flow must
/// react: `Config` is fatal to the calling flow and never retried,
/// `Transport` aborts the remaining steps of the current batch,
/// `ResponseMismatch` indicates version skew between client and remote,
/// and `Application` is the remote's own rejection surfaced verbatim.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("dispatch failed: {0}")]
    Transport(String),

    #[error("response type mismatch: expected {expected}, got {actual}")]
    ResponseMismatch { expected: String, actual: String },

    #[error("remote rejected request: {0}")]
    Application(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors that mean the local setup is wrong and a retry of
    /// the same call can never succeed.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}
