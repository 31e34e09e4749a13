use serde::{Deserialize, Serialize};

use super::defaults;

/// Where and how events leave the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Collection endpoint URL or path.
    pub endpoint: String,
    /// Opaque client token, sent as a bearer credential with every request.
    pub client_token: Option<String>,
    /// Request timeout in seconds for transports that support one.
    pub request_timeout_secs: u64,
    /// Timeout for the final unload send, in milliseconds.
    pub beacon_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_ENDPOINT.to_string(),
            client_token: None,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            beacon_timeout_ms: defaults::DEFAULT_BEACON_TIMEOUT_MS,
        }
    }
}
