//! # pagelog-dispatch
//!
//! The only component that touches the network. Events are either queued
//! and flushed in batches (on a timer or when the queue reaches the batch
//! size) or sent one request per event.
//!
//! A failed batch goes back to the *front* of the queue, ahead of anything
//! produced since. This is a best-effort retry, not a durable queue.
//!
//! The HTTP transport is feature-gated behind `http`.

pub mod dispatcher;
pub mod http_transport;
pub mod queue;
pub mod stats;

pub use dispatcher::{BatchContext, Dispatcher, FlushOutcome, InFlightBatch};
pub use http_transport::{HttpTransport, HttpTransportConfig};
pub use queue::PendingQueue;
pub use stats::DispatchStats;
