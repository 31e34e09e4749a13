//! Batched request body: `{ events: [...], sessionId, timestamp, userAgent, userId? }`.

use pagelog_core::errors::{DecodeError, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::decode_at;
use crate::envelope::Envelope;
use crate::schema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub events: Vec<Envelope>,
    pub session_id: String,
    /// Flush time, epoch milliseconds.
    pub timestamp: u64,
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl BatchRequest {
    pub fn encode(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(|e| TransportError::Serialization {
            reason: e.to_string(),
        })
    }
}

/// A batch whose header validated. Each event is decoded on its own, so one
/// bad event leaves the rest usable.
#[derive(Debug)]
pub struct DecodedBatch {
    pub session_id: String,
    pub timestamp: u64,
    pub user_agent: String,
    pub user_id: Option<String>,
    pub events: Vec<Result<Envelope, DecodeError>>,
}

impl DecodedBatch {
    pub fn valid_events(&self) -> impl Iterator<Item = &Envelope> {
        self.events.iter().filter_map(|e| e.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &DecodeError> {
        self.events.iter().filter_map(|e| e.as_ref().err())
    }
}

/// Parse a batched body. Header problems fail the whole batch; event
/// problems are reported per event with an `events[i]` path prefix.
pub fn decode_batch(json: &str) -> Result<DecodedBatch, DecodeError> {
    let value: Value = serde_json::from_str(json).map_err(|e| DecodeError::Malformed {
        reason: e.to_string(),
    })?;
    let map = schema::as_object(&value, "")?;

    schema::validate_fields(map, schema::BATCH_HEADER, "")?;
    let known = schema::BATCH_HEADER
        .iter()
        .map(|f| f.name)
        .chain(std::iter::once("events"));
    schema::reject_unknown(map, known, "")?;

    let raw_events = match map.get("events") {
        None => {
            return Err(DecodeError::MissingField {
                field: "events".to_string(),
                expected: "an array".to_string(),
            });
        }
        Some(Value::Array(items)) => items.clone(),
        Some(other) => {
            return Err(DecodeError::WrongType {
                field: "events".to_string(),
                expected: "an array".to_string(),
                found: schema::describe_value(other),
            });
        }
    };

    let str_field = |name: &str| map.get(name).and_then(Value::as_str).map(str::to_string);
    let events = raw_events
        .into_iter()
        .enumerate()
        .map(|(i, raw)| decode_at(raw, &format!("events[{i}]")))
        .collect();

    Ok(DecodedBatch {
        session_id: str_field("sessionId").unwrap_or_default(),
        timestamp: map.get("timestamp").and_then(Value::as_u64).unwrap_or_default(),
        user_agent: str_field("userAgent").unwrap_or_default(),
        user_id: str_field("userId"),
        events,
    })
}
