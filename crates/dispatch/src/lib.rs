//! Remote job dispatch for fleetlink.
//!
//! Serializes typed payloads into wire envelopes, sends them over the
//! transport boundary to a stage address, and decodes typed responses.
//! The dispatcher itself never retries and never caches.

pub mod dispatcher;
pub mod envelope;
pub mod pacing;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use envelope::{Envelope, ERROR_KIND};
pub use pacing::{IntervalPacer, NoPacer, Pacer};
pub use transport::{RestTransport, Transport};
