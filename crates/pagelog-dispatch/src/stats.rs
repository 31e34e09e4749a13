use serde::Serialize;

/// Running dispatch counters for one collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchStats {
    /// Requests that reached the transport successfully.
    pub requests_sent: u64,
    pub events_sent: u64,
    pub failed_attempts: u64,
    /// Events returned to the queue after a failed attempt.
    pub events_requeued: u64,
    /// Events lost for good: immediate-mode failures and queue overflow.
    pub events_dropped: u64,
}

impl DispatchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
