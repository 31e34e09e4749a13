//! Host capabilities the collector depends on.
//!
//! The collector never touches browser globals directly; the embedding
//! adapter provides one implementation of each trait.

mod clock;
mod event_source;
mod page;
mod scheduler;
mod store;
mod transport;

pub use clock::{Clock, SystemClock};
pub use event_source::EventSource;
pub use page::PageContext;
pub use scheduler::{Scheduler, TimerId};
pub use store::{KeyValueStore, MemoryStore};
pub use transport::{Delivery, OutboundRequest, Transport};
