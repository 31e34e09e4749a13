//! Variant payloads carried in the `data` field of an envelope.
//! All timestamps and durations are milliseconds.

use serde::{Deserialize, Serialize};

/// Who produced the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionKind {
    #[default]
    User,
    Synthetics,
}

/// Descriptive attributes of a session, repeated on start and end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionAttributes {
    pub fingerprint: String,
    pub is_active: bool,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    /// Client address. Optional on the wire: the page cannot observe it, so
    /// collectors never send it and receivers that stamp it on arrival may.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// Final counters reported when a session closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionMetrics {
    pub action_count: u64,
    pub view_count: u64,
    pub time_spent: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionStart {
    /// The session identifier.
    pub id: String,
    pub start_timestamp: u64,
    pub attributes: SessionAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionEnd {
    /// The session identifier.
    pub id: String,
    pub start_timestamp: u64,
    pub end_timestamp: u64,
    pub attributes: SessionAttributes,
    pub metrics: SessionMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewStart {
    /// The view identifier, unique per navigation.
    pub id: String,
    pub session_id: String,
    pub path: String,
    pub url: String,
    pub start_timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewEnd {
    pub id: String,
    pub session_id: String,
    pub path: String,
    pub url: String,
    pub start_timestamp: u64,
    pub end_timestamp: u64,
    pub time_spent: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

impl ViewEnd {
    /// Close a view at `end_timestamp`, carrying over its identity fields.
    pub fn closing(start: &ViewStart, end_timestamp: u64) -> Self {
        Self {
            id: start.id.clone(),
            session_id: start.session_id.clone(),
            path: start.path.clone(),
            url: start.url.clone(),
            start_timestamp: start.start_timestamp,
            end_timestamp,
            time_spent: end_timestamp.saturating_sub(start.start_timestamp),
            title: start.title.clone(),
            referrer: start.referrer.clone(),
        }
    }
}

/// Kind of tracked interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Click,
    FormSubmit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Action {
    pub id: String,
    pub session_id: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}
