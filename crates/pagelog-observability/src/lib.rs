//! # pagelog-observability
//!
//! Structured logging for the collector: subscriber setup, span definitions,
//! and one event function per notable lifecycle or dispatch occurrence.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
