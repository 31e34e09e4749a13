//! # pagelog-core
//!
//! Foundation crate for the pagelog collector.
//! Defines the host capability traits, shared models, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PageLogConfig;
pub use errors::{PageLogError, PageLogResult};
pub use models::{DeviceProfile, FormDescriptor, HostEvent, HostEventKind, TargetDescriptor};
pub use traits::{
    Clock, Delivery, EventSource, KeyValueStore, MemoryStore, OutboundRequest, PageContext,
    Scheduler, SystemClock, TimerId, Transport,
};
