//! # pagelog-collector
//!
//! The orchestrator. A [`Collector`] owns the current session and the open
//! view, turns host callbacks into typed events, and hands them to the
//! dispatcher. Host capabilities (clock, store, page, listeners, timer,
//! transport) are injected through [`Host`].
//!
//! Lifecycle: `Uninitialized -> Initialized -> Destroyed`. Out-of-order
//! calls are no-ops, never errors.

pub mod collector;
pub mod host;
pub mod lifecycle;
mod targets;

pub use collector::Collector;
pub use host::Host;
pub use lifecycle::LifecycleState;
pub use pagelog_dispatch::{DispatchStats, FlushOutcome, InFlightBatch};
