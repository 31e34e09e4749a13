//! Envelope encoding and strict decoding.

use chrono::{DateTime, Utc};
use pagelog_core::errors::{DecodeError, TransportError};
use serde_json::Value;

use crate::envelope::{Envelope, EventType};
use crate::schema::{self, FieldKind};

/// Milliseconds since the Unix epoch, clamped at zero.
pub fn epoch_millis(at: DateTime<Utc>) -> u64 {
    at.timestamp_millis().max(0) as u64
}

/// Serialize an envelope to its JSON wire form.
pub fn encode_envelope(envelope: &Envelope) -> Result<String, TransportError> {
    serde_json::to_string(envelope).map_err(|e| TransportError::Serialization {
        reason: e.to_string(),
    })
}

/// Parse and validate a single envelope.
pub fn decode_envelope(json: &str) -> Result<Envelope, DecodeError> {
    let value: Value = serde_json::from_str(json).map_err(|e| DecodeError::Malformed {
        reason: e.to_string(),
    })?;
    decode_envelope_value(value)
}

/// Validate an already-parsed envelope. `path` is empty at the root.
pub fn decode_envelope_value(value: Value) -> Result<Envelope, DecodeError> {
    decode_at(value, "")
}

pub(crate) fn decode_at(value: Value, path: &str) -> Result<Envelope, DecodeError> {
    let map = schema::as_object(&value, path)?;

    let type_path = schema::join(path, "type");
    let type_kind = FieldKind::Enum(schema::EVENT_TYPES);
    let event_type = match map.get("type") {
        None => {
            return Err(DecodeError::MissingField {
                field: type_path,
                expected: type_kind.describe(),
            });
        }
        Some(Value::String(s)) => EventType::parse(s).ok_or_else(|| DecodeError::UnknownVariant {
            field: type_path.clone(),
            value: format!("\"{s}\""),
            expected: format!("[{}]", schema::EVENT_TYPES.join(", ")),
        })?,
        Some(other) => {
            return Err(DecodeError::WrongType {
                field: type_path,
                expected: type_kind.describe(),
                found: schema::describe_value(other),
            });
        }
    };

    let data_path = schema::join(path, "data");
    let Some(data) = map.get("data") else {
        return Err(DecodeError::MissingField {
            field: data_path,
            expected: "an object".to_string(),
        });
    };
    schema::validate_object(data, schema::payload_schema(event_type), &data_path)?;
    schema::reject_unknown(map, ["type", "data"].into_iter(), path)?;

    serde_json::from_value(value).map_err(|e| DecodeError::Malformed {
        reason: e.to_string(),
    })
}
