use crate::models::HostEventKind;

/// Wires raw page listeners to the collector.
///
/// After `attach`, the adapter forwards every matching page event to
/// `Collector::handle_event`. After `detach`, it must stop forwarding.
pub trait EventSource {
    fn attach(&mut self, kinds: &[HostEventKind]);
    fn detach(&mut self);
}
