//! Structured log events for key collector operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a session start.
pub fn session_started(session_id: &str, reused: bool) {
    tracing::info!(
        event = "session_started",
        session_id = %session_id,
        reused = reused,
        "session started"
    );
}

/// Log a session end with its final counters.
pub fn session_ended(session_id: &str, view_count: u64, action_count: u64, time_spent_ms: u64) {
    tracing::info!(
        event = "session_ended",
        session_id = %session_id,
        view_count = view_count,
        action_count = action_count,
        time_spent_ms = time_spent_ms,
        "session ended"
    );
}

/// Log a view opening.
pub fn view_opened(view_id: &str, path: &str) {
    tracing::debug!(event = "view_opened", view_id = %view_id, path = %path, "view opened");
}

/// Log a view closing.
pub fn view_closed(view_id: &str, time_spent_ms: u64) {
    tracing::debug!(
        event = "view_closed",
        view_id = %view_id,
        time_spent_ms = time_spent_ms,
        "view closed"
    );
}

/// Log a lifecycle call that was ignored because it arrived out of order.
pub fn lifecycle_ignored(operation: &str, reason: &str) {
    tracing::debug!(
        event = "lifecycle_ignored",
        operation = %operation,
        reason = %reason,
        "lifecycle call ignored"
    );
}

/// Log a successful batch send.
pub fn batch_sent(event_count: usize) {
    tracing::debug!(event = "batch_sent", event_count = event_count, "batch sent");
}

/// Log a failed batch send whose events went back to the queue.
pub fn batch_requeued(event_count: usize, error: &str) {
    tracing::warn!(
        event = "batch_requeued",
        event_count = event_count,
        error = %error,
        "failed to send logs, events re-queued"
    );
}

/// Log events lost for good.
pub fn events_dropped(event_count: usize, reason: &str) {
    tracing::warn!(
        event = "events_dropped",
        event_count = event_count,
        reason = %reason,
        "telemetry dropped"
    );
}

/// Log a failed write to the session store.
pub fn store_write_failed(key: &str, error: &str) {
    tracing::warn!(
        event = "store_write_failed",
        key = %key,
        error = %error,
        "session store write failed"
    );
}
