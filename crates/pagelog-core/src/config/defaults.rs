// Single source of truth for all default values.

// --- Transport ---
pub const DEFAULT_ENDPOINT: &str = "/api/logs";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Upper bound for the final unload send, so teardown is never held up for long.
pub const DEFAULT_BEACON_TIMEOUT_MS: u64 = 2_000;

// --- Dispatch ---
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 20;
pub const DEFAULT_MAX_QUEUE_SIZE: usize = 1_000;

// --- Collector ---
pub const DEFAULT_AUTO_INIT: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
