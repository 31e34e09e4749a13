use std::collections::HashMap;

use super::PageLogConfig;
use crate::errors::ConfigError;

pub const ATTR_ENDPOINT: &str = "data-endpoint";
pub const ATTR_FLUSH_INTERVAL: &str = "data-flush-interval";
pub const ATTR_USER_ID: &str = "data-user-id";
pub const ATTR_CLIENT_TOKEN: &str = "data-client-token";
pub const ATTR_AUTO_INIT: &str = "data-auto-init";

impl PageLogConfig {
    /// Build a config from the `data-*` attributes of the embedding script tag.
    ///
    /// Empty attributes count as absent. An unparsable flush interval keeps
    /// the default rather than failing the page.
    pub fn from_attributes(attrs: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let non_empty = |name: &str| {
            attrs
                .get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if let Some(endpoint) = non_empty(ATTR_ENDPOINT) {
            config.transport.endpoint = endpoint;
        }
        if let Some(raw) = non_empty(ATTR_FLUSH_INTERVAL) {
            match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => config.dispatch.flush_interval_ms = ms,
                _ => tracing::warn!(
                    attribute = ATTR_FLUSH_INTERVAL,
                    value = %raw,
                    "ignoring unparsable flush interval"
                ),
            }
        }
        config.collector.user_id = non_empty(ATTR_USER_ID);
        config.transport.client_token = non_empty(ATTR_CLIENT_TOKEN);
        if attrs.get(ATTR_AUTO_INIT).map(String::as_str) == Some("false") {
            config.collector.auto_init = false;
        }

        config.validate()?;
        Ok(config)
    }
}
