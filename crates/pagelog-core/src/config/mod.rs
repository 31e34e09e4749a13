//! Collector configuration, loaded from TOML or from the embedding tag's
//! `data-*` attributes. Every section falls back to `defaults`.

mod attributes;
pub mod collector_config;
pub mod defaults;
pub mod dispatch_config;
pub mod observability_config;
pub mod transport_config;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use collector_config::CollectorConfig;
pub use dispatch_config::{DispatchConfig, DispatchMode, SendCompletion};
pub use observability_config::ObservabilityConfig;
pub use transport_config::TransportConfig;

/// Root configuration for a collector instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLogConfig {
    pub transport: TransportConfig,
    pub dispatch: DispatchConfig,
    pub collector: CollectorConfig,
    pub observability: ObservabilityConfig,
}

impl PageLogConfig {
    /// Parse a TOML document. Missing sections and keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the dispatcher cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport.endpoint.trim().is_empty() {
            return Err(invalid("transport.endpoint", "must not be empty"));
        }
        if self.dispatch.flush_interval_ms == 0 {
            return Err(invalid("dispatch.flush_interval_ms", "must be positive"));
        }
        if self.dispatch.max_batch_size == 0 {
            return Err(invalid("dispatch.max_batch_size", "must be at least 1"));
        }
        if self.dispatch.max_queue_size < self.dispatch.max_batch_size {
            return Err(invalid(
                "dispatch.max_queue_size",
                "must not be smaller than dispatch.max_batch_size",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
