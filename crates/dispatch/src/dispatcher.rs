//! The job dispatcher.

use crate::envelope::Envelope;
use crate::transport::Transport;
use fleetlink_common::{Error, Result, WirePayload};
use fleetlink_routing::StageAddress;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Submits typed payloads to stage addresses and decodes typed responses.
///
/// Each submit is one blocking (awaited) request/response exchange with no
/// retry and no response caching; retries are the caller's choice. Because
/// every call awaits its response before the next is issued, requests from
/// one caller are observed in submission order.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Dispatcher { transport }
    }

    /// Submit a payload to an address and decode the expected response type.
    ///
    /// An unresolved address is a configuration error and fails here,
    /// before any network call is attempted.
    pub async fn submit<P, R>(&self, address: &StageAddress, payload: &P) -> Result<R>
    where
        P: WirePayload + Serialize + Sync,
        R: WirePayload + DeserializeOwned,
    {
        if !address.is_resolved() {
            return Err(Error::Config(
                "refusing to dispatch to unresolved address".to_string(),
            ));
        }

        let request = Envelope::encode(payload)?;
        debug!(
            "dispatching {} to {} expecting {}",
            request.kind,
            address,
            R::PAYLOAD_TYPE
        );
        let response = self.transport.send(&address.route(), &request).await?;
        response.decode()
    }
}
