//! Field schemas for every payload shape, checked against raw JSON before
//! typed deserialization. Optional fields may be absent but never `null`;
//! fields not listed are rejected.

use pagelog_core::errors::DecodeError;
use serde_json::{Map, Value};

use crate::envelope::EventType;

/// Primitive or nested shape expected for a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Bool,
    /// Non-negative integer: timestamps, durations, counters.
    UnsignedInt,
    Enum(&'static [&'static str]),
    Object(&'static [FieldSpec]),
}

impl FieldKind {
    pub fn describe(&self) -> String {
        match self {
            Self::String => "a string".to_string(),
            Self::Bool => "a boolean".to_string(),
            Self::UnsignedInt => "a non-negative integer".to_string(),
            Self::Enum(cases) => format!("one of [{}]", quoted(cases)),
            Self::Object(_) => "an object".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: false,
    }
}

pub const SESSION_KINDS: &[&str] = &["USER", "SYNTHETICS"];
pub const ACTION_KINDS: &[&str] = &["CLICK", "FORM_SUBMIT"];
pub const EVENT_TYPES: &[&str] = &[
    "SESSION_START",
    "SESSION_END",
    "VIEW_START",
    "VIEW_END",
    "ACTION",
];

pub const SESSION_ATTRIBUTES: &[FieldSpec] = &[
    required("fingerprint", FieldKind::String),
    required("isActive", FieldKind::Bool),
    required("type", FieldKind::Enum(SESSION_KINDS)),
    optional("referrer", FieldKind::String),
    // Absent from page-produced events; accepted when a receiver has added it.
    optional("ip", FieldKind::String),
];

pub const SESSION_METRICS: &[FieldSpec] = &[
    required("actionCount", FieldKind::UnsignedInt),
    required("viewCount", FieldKind::UnsignedInt),
    required("timeSpent", FieldKind::UnsignedInt),
];

pub const SESSION_START: &[FieldSpec] = &[
    required("id", FieldKind::String),
    required("startTimestamp", FieldKind::UnsignedInt),
    required("attributes", FieldKind::Object(SESSION_ATTRIBUTES)),
];

pub const SESSION_END: &[FieldSpec] = &[
    required("id", FieldKind::String),
    required("startTimestamp", FieldKind::UnsignedInt),
    required("endTimestamp", FieldKind::UnsignedInt),
    required("attributes", FieldKind::Object(SESSION_ATTRIBUTES)),
    required("metrics", FieldKind::Object(SESSION_METRICS)),
];

pub const VIEW_START: &[FieldSpec] = &[
    required("id", FieldKind::String),
    required("sessionId", FieldKind::String),
    required("path", FieldKind::String),
    required("url", FieldKind::String),
    required("startTimestamp", FieldKind::UnsignedInt),
    optional("title", FieldKind::String),
    optional("referrer", FieldKind::String),
];

pub const VIEW_END: &[FieldSpec] = &[
    required("id", FieldKind::String),
    required("sessionId", FieldKind::String),
    required("path", FieldKind::String),
    required("url", FieldKind::String),
    required("startTimestamp", FieldKind::UnsignedInt),
    required("endTimestamp", FieldKind::UnsignedInt),
    required("timeSpent", FieldKind::UnsignedInt),
    optional("title", FieldKind::String),
    optional("referrer", FieldKind::String),
];

pub const ACTION: &[FieldSpec] = &[
    required("id", FieldKind::String),
    required("sessionId", FieldKind::String),
    required("type", FieldKind::Enum(ACTION_KINDS)),
    required("timestamp", FieldKind::UnsignedInt),
    optional("target", FieldKind::String),
];

pub const BATCH_HEADER: &[FieldSpec] = &[
    required("sessionId", FieldKind::String),
    required("timestamp", FieldKind::UnsignedInt),
    required("userAgent", FieldKind::String),
    optional("userId", FieldKind::String),
];

/// Schema of the `data` payload for an event type.
pub fn payload_schema(event_type: EventType) -> &'static [FieldSpec] {
    match event_type {
        EventType::SessionStart => SESSION_START,
        EventType::SessionEnd => SESSION_END,
        EventType::ViewStart => VIEW_START,
        EventType::ViewEnd => VIEW_END,
        EventType::Action => ACTION,
    }
}

/// Validate `value` as an object matching `fields`. `path` prefixes
/// reported field names.
pub fn validate_object(value: &Value, fields: &[FieldSpec], path: &str) -> Result<(), DecodeError> {
    let map = as_object(value, path)?;
    validate_fields(map, fields, path)?;
    reject_unknown(map, fields.iter().map(|f| f.name), path)
}

/// Check the listed fields of `map` without rejecting extra keys.
pub fn validate_fields(
    map: &Map<String, Value>,
    fields: &[FieldSpec],
    path: &str,
) -> Result<(), DecodeError> {
    for spec in fields {
        let field_path = join(path, spec.name);
        match map.get(spec.name) {
            None if spec.required => {
                return Err(DecodeError::MissingField {
                    field: field_path,
                    expected: spec.kind.describe(),
                });
            }
            None => {}
            Some(v) => validate_value(v, &spec.kind, &field_path)?,
        }
    }
    Ok(())
}

/// Reject any key of `map` not in `known`.
pub fn reject_unknown<'a>(
    map: &Map<String, Value>,
    known: impl Iterator<Item = &'a str> + Clone,
    path: &str,
) -> Result<(), DecodeError> {
    for key in map.keys() {
        if !known.clone().any(|k| k == key.as_str()) {
            return Err(DecodeError::UnknownField {
                field: join(path, key),
            });
        }
    }
    Ok(())
}

pub fn as_object<'v>(value: &'v Value, path: &str) -> Result<&'v Map<String, Value>, DecodeError> {
    value.as_object().ok_or_else(|| DecodeError::WrongType {
        field: display_path(path),
        expected: "an object".to_string(),
        found: describe_value(value),
    })
}

fn validate_value(value: &Value, kind: &FieldKind, path: &str) -> Result<(), DecodeError> {
    let ok = match kind {
        FieldKind::String => value.is_string(),
        FieldKind::Bool => value.is_boolean(),
        FieldKind::UnsignedInt => value.is_u64(),
        FieldKind::Enum(cases) => {
            let Some(s) = value.as_str() else {
                return Err(wrong_type(value, kind, path));
            };
            if !cases.contains(&s) {
                return Err(DecodeError::UnknownVariant {
                    field: path.to_string(),
                    value: format!("\"{s}\""),
                    expected: format!("[{}]", quoted(cases)),
                });
            }
            true
        }
        FieldKind::Object(fields) => return validate_object(value, fields, path),
    };
    if ok {
        Ok(())
    } else {
        Err(wrong_type(value, kind, path))
    }
}

fn wrong_type(value: &Value, kind: &FieldKind, path: &str) -> DecodeError {
    DecodeError::WrongType {
        field: path.to_string(),
        expected: kind.describe(),
        found: describe_value(value),
    }
}

/// Short rendering of an offending value for error messages.
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Object(_) => "an object".to_string(),
        Value::Array(_) => "an array".to_string(),
        other => other.to_string(),
    }
}

pub fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

fn quoted(cases: &[&str]) -> String {
    cases
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
