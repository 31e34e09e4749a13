//! Mutable per-session state owned by the collector.

use pagelog_events::{
    SessionAttributes, SessionEnd, SessionKind, SessionMetrics, SessionStart, ViewEnd, ViewStart,
};

/// One browsing session: identity plus running counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub fingerprint: String,
    pub referrer: Option<String>,
    pub start_timestamp: u64,
    pub end_timestamp: Option<u64>,
    pub is_active: bool,
    pub view_count: u64,
    pub action_count: u64,
    /// Sum of closed view durations, in milliseconds.
    pub time_spent: u64,
}

impl Session {
    pub fn start(
        session_id: String,
        fingerprint: String,
        referrer: Option<String>,
        start_timestamp: u64,
    ) -> Self {
        Self {
            session_id,
            fingerprint,
            referrer,
            start_timestamp,
            end_timestamp: None,
            is_active: true,
            view_count: 0,
            action_count: 0,
            time_spent: 0,
        }
    }

    pub fn record_view(&mut self) {
        self.view_count += 1;
    }

    pub fn record_action(&mut self) {
        self.action_count += 1;
    }

    pub fn add_time_spent(&mut self, millis: u64) {
        self.time_spent = self.time_spent.saturating_add(millis);
    }

    /// Mark the session closed. Returns `false` if it already was.
    pub fn close(&mut self, end_timestamp: u64) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_active = false;
        self.end_timestamp = Some(end_timestamp.max(self.start_timestamp));
        true
    }

    pub fn metrics(&self) -> SessionMetrics {
        SessionMetrics {
            action_count: self.action_count,
            view_count: self.view_count,
            time_spent: self.time_spent,
        }
    }

    pub fn attributes(&self) -> SessionAttributes {
        SessionAttributes {
            fingerprint: self.fingerprint.clone(),
            is_active: self.is_active,
            kind: SessionKind::User,
            referrer: self.referrer.clone(),
            ip: None,
        }
    }

    pub fn start_event(&self) -> SessionStart {
        SessionStart {
            id: self.session_id.clone(),
            start_timestamp: self.start_timestamp,
            attributes: self.attributes(),
        }
    }

    /// Closing event, available once the session has been closed.
    pub fn end_event(&self) -> Option<SessionEnd> {
        let end_timestamp = self.end_timestamp?;
        Some(SessionEnd {
            id: self.session_id.clone(),
            start_timestamp: self.start_timestamp,
            end_timestamp,
            attributes: self.attributes(),
            metrics: self.metrics(),
        })
    }
}

/// Holds at most one open view.
#[derive(Debug, Clone, Default)]
pub struct ViewTracker {
    open: Option<ViewStart>,
}

impl ViewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ViewStart> {
        self.open.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open `view`. Refused (returns `false`) while another view is open.
    pub fn open(&mut self, view: ViewStart) -> bool {
        if self.open.is_some() {
            return false;
        }
        self.open = Some(view);
        true
    }

    /// Close the open view at `end_timestamp`; `None` if nothing is open.
    pub fn close(&mut self, end_timestamp: u64) -> Option<ViewEnd> {
        self.open
            .take()
            .map(|start| ViewEnd::closing(&start, end_timestamp))
    }
}
