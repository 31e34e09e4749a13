//! Capabilities the collector needs from its host page.

use pagelog_core::traits::{
    Clock, EventSource, KeyValueStore, PageContext, Scheduler, SystemClock, Transport,
};

/// Everything the collector borrows from the page, boxed and owned.
pub struct Host {
    pub clock: Box<dyn Clock>,
    pub store: Box<dyn KeyValueStore>,
    pub page: Box<dyn PageContext>,
    pub events: Box<dyn EventSource>,
    pub scheduler: Box<dyn Scheduler>,
    pub transport: Box<dyn Transport>,
}

impl Host {
    /// Host on the system clock; the rest is supplied by the adapter.
    pub fn with_system_clock(
        store: Box<dyn KeyValueStore>,
        page: Box<dyn PageContext>,
        events: Box<dyn EventSource>,
        scheduler: Box<dyn Scheduler>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            clock: Box::new(SystemClock),
            store,
            page,
            events,
            scheduler,
            transport,
        }
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}
