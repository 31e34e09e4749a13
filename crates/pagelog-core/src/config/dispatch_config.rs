use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// How produced events are handed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Queue events and send them in batches on a timer or size threshold.
    #[default]
    Batched,
    /// Send every event as its own request; failures are dropped.
    Immediate,
}

/// Who settles a batch send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendCompletion {
    /// The dispatcher calls `Transport::send` and settles on its result.
    #[default]
    Inline,
    /// The host sends each batch itself and reports the result later
    /// through `begin_flush` / `complete`. Due flushes are only signalled.
    Host,
}

/// Batching and flush policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub mode: DispatchMode,
    /// Batched mode only.
    pub completion: SendCompletion,
    /// Periodic flush interval in milliseconds (batched mode only).
    pub flush_interval_ms: u64,
    /// Queue length that triggers a flush without waiting for the timer.
    pub max_batch_size: usize,
    /// Hard cap on queued events; the oldest are dropped beyond it.
    pub max_queue_size: usize,
}

impl DispatchConfig {
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::default(),
            completion: SendCompletion::default(),
            flush_interval_ms: defaults::DEFAULT_FLUSH_INTERVAL_MS,
            max_batch_size: defaults::DEFAULT_MAX_BATCH_SIZE,
            max_queue_size: defaults::DEFAULT_MAX_QUEUE_SIZE,
        }
    }
}
