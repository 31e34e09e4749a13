//! Span definitions for the collector lifecycle and the flush path.

/// Create a lifecycle span (`init`, `destroy`, `unload`).
#[macro_export]
macro_rules! lifecycle_span {
    ($operation:expr, $session_id:expr) => {
        tracing::info_span!("pagelog.lifecycle", operation = %$operation, session_id = %$session_id)
    };
}

/// Create a flush span.
#[macro_export]
macro_rules! flush_span {
    ($batch_size:expr, $delivery:expr) => {
        tracing::debug_span!("pagelog.flush", batch_size = $batch_size, delivery = ?$delivery)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const LIFECYCLE: &str = "pagelog.lifecycle";
    pub const FLUSH: &str = "pagelog.flush";
}
