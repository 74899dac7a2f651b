//! JSON wire envelope.
//!
//! Every request and response crossing the dispatch boundary is an envelope:
//! a payload-type tag plus the payload body. A response tagged `error` is
//! the remote's application-level rejection; anything else must match the
//! type the call site expects.

use fleetlink_common::{Error, Result, WirePayload};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Envelope kind reserved for application-level errors from the remote.
pub const ERROR_KIND: &str = "error";

/// One message on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub body: serde_json::Value,
}

impl Envelope {
    /// Wrap a payload for transmission.
    pub fn encode<P>(payload: &P) -> Result<Self>
    where
        P: WirePayload + Serialize,
    {
        Ok(Envelope {
            kind: P::PAYLOAD_TYPE.to_string(),
            body: serde_json::to_value(payload)?,
        })
    }

    /// Build an error envelope (used by test doubles and service stubs).
    pub fn error(message: impl Into<String>) -> Self {
        Envelope {
            kind: ERROR_KIND.to_string(),
            body: serde_json::json!({ "message": message.into() }),
        }
    }

    /// Unwrap a response against an explicit expected payload type.
    ///
    /// An `error` envelope surfaces verbatim as [`Error::Application`]; a
    /// well-formed envelope of any other unexpected kind is
    /// [`Error::ResponseMismatch`], which indicates version skew between
    /// this client and the remote.
    pub fn decode<R>(self) -> Result<R>
    where
        R: WirePayload + DeserializeOwned,
    {
        if self.kind == ERROR_KIND {
            let message = self
                .body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unspecified remote error")
                .to_string();
            return Err(Error::Application(message));
        }
        if self.kind != R::PAYLOAD_TYPE {
            return Err(Error::ResponseMismatch {
                expected: R::PAYLOAD_TYPE.to_string(),
                actual: self.kind,
            });
        }
        Ok(serde_json::from_value(self.body)?)
    }
}
