//! Transport boundary for dispatch.

use crate::envelope::Envelope;
use async_trait::async_trait;
use fleetlink_common::{Error, Result};
use tracing::debug;

/// The request/response boundary a dispatcher sends through.
///
/// One call is one synchronous exchange; implementations do not retry,
/// cache, or reorder. Timeout behavior is whatever the underlying transport
/// enforces.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one envelope to a `"<area>/<service>"` route and read the
    /// response envelope.
    async fn send(&self, route: &str, request: &Envelope) -> Result<Envelope>;
}

/// REST transport posting envelopes to a remote service endpoint.
pub struct RestTransport {
    base_url: String,
    client: reqwest::Client,
}

impl RestTransport {
    /// Create a transport for a base URL such as `https://10.20.30.2:8443`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(RestTransport {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn send(&self, route: &str, request: &Envelope) -> Result<Envelope> {
        let url = format!("{}/{}", self.base_url, route);
        debug!("POST {} ({})", url, request.kind);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        // Error statuses still carry an envelope when the remote rejected
        // the request at the application level; only an unreadable body is
        // a transport failure.
        match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(Error::Transport(format!(
                "{} returned HTTP {}",
                url, status
            ))),
            Err(e) => Err(Error::Transport(format!(
                "unreadable response from {}: {}",
                url, e
            ))),
        }
    }
}
