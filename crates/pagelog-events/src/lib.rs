//! # pagelog-events
//!
//! The event model: five payload shapes (session start/end, view start/end,
//! action), the `{ type, data }` envelope that tags them, and the batched
//! request body. Decoding is strict: every payload is checked against a
//! field schema before typed deserialization, so failures name the field.

pub mod batch;
pub mod codec;
pub mod envelope;
pub mod payloads;
pub mod schema;

pub use batch::{decode_batch, BatchRequest, DecodedBatch};
pub use codec::{decode_envelope, decode_envelope_value, encode_envelope, epoch_millis};
pub use envelope::{Envelope, EventType};
pub use payloads::{
    Action, ActionKind, SessionAttributes, SessionEnd, SessionKind, SessionMetrics, SessionStart,
    ViewEnd, ViewStart,
};
