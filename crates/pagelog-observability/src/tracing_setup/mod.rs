//! Subscriber installation. All output is JSON, one object per line.

pub mod events;
pub mod spans;

use pagelog_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "PAGELOG_LOG";

/// Install the JSON subscriber at `info`, unless `PAGELOG_LOG` says otherwise.
/// Later calls are ignored once a global subscriber exists.
pub fn init_tracing() {
    install(filter_from_env(pagelog_core::config::defaults::DEFAULT_LOG_LEVEL));
}

/// Same as [`init_tracing`], with the configured level as the fallback.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    install(filter_from_env(&config.log_level));
}

/// Install with an explicit filter directive, ignoring the environment.
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter));
}

fn filter_from_env(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn install(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init();
}
