use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payloads::{Action, SessionEnd, SessionStart, ViewEnd, ViewStart};

/// Wire wrapper: `{ "type": "<EVENT_TYPE>", "data": { ... } }`.
/// Exactly one payload shape is valid per `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Envelope {
    SessionStart(SessionStart),
    SessionEnd(SessionEnd),
    ViewStart(ViewStart),
    ViewEnd(ViewEnd),
    Action(Action),
}

impl Envelope {
    pub fn event_type(&self) -> EventType {
        match self {
            Self::SessionStart(_) => EventType::SessionStart,
            Self::SessionEnd(_) => EventType::SessionEnd,
            Self::ViewStart(_) => EventType::ViewStart,
            Self::ViewEnd(_) => EventType::ViewEnd,
            Self::Action(_) => EventType::Action,
        }
    }

    /// Session the event belongs to.
    pub fn session_id(&self) -> &str {
        match self {
            Self::SessionStart(s) => &s.id,
            Self::SessionEnd(s) => &s.id,
            Self::ViewStart(v) => &v.session_id,
            Self::ViewEnd(v) => &v.session_id,
            Self::Action(a) => &a.session_id,
        }
    }
}

/// The `type` discriminator of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    SessionStart,
    SessionEnd,
    ViewStart,
    ViewEnd,
    Action,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::SessionStart,
        EventType::SessionEnd,
        EventType::ViewStart,
        EventType::ViewEnd,
        EventType::Action,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionStart => "SESSION_START",
            Self::SessionEnd => "SESSION_END",
            Self::ViewStart => "VIEW_START",
            Self::ViewEnd => "VIEW_END",
            Self::Action => "ACTION",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
