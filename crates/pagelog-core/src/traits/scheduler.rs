use std::time::Duration;

/// Handle to a periodic timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Periodic timer owned by the collector. Each tick, the host calls
/// `Collector::on_flush_timer`.
pub trait Scheduler {
    fn start_interval(&mut self, every: Duration) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}
