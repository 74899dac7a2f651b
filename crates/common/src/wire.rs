//! Wire payload type tagging.
//!
//! Every message exchanged over the dispatch boundary carries a type tag so
//! the receiving side (and the dispatching side, on the way back) can check
//! the payload shape before deserializing it. The tag is part of the wire
//! contract: changing it is a protocol change.

/// A structured message that can travel over the dispatch boundary.
pub trait WirePayload {
    /// The type tag carried on the wire envelope for this payload.
    const PAYLOAD_TYPE: &'static str;

    /// The type tag of this value.
    fn payload_type(&self) -> &'static str {
        Self::PAYLOAD_TYPE
    }
}
