use serde::{Deserialize, Serialize};

use super::defaults;

/// Collector identity and bootstrap options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Opaque user identifier forwarded with every batch.
    pub user_id: Option<String>,
    /// Whether the embedding adapter should call `init()` right after construction.
    pub auto_init: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            auto_init: defaults::DEFAULT_AUTO_INIT,
        }
    }
}
