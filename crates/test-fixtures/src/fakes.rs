//! In-memory fakes for the host capabilities.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use pagelog_core::errors::{StoreError, TransportError};
use pagelog_core::models::{DeviceProfile, HostEventKind};
use pagelog_core::traits::{
    Clock, Delivery, EventSource, KeyValueStore, MemoryStore, OutboundRequest, PageContext,
    Scheduler, TimerId, Transport,
};

// ─── Clock ─────────────────────────────────────────────────

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn at_millis(millis: i64) -> Self {
        Self {
            millis: Rc::new(Cell::new(millis)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.millis.set(self.millis.get() + by.as_millis() as i64);
    }

    pub fn millis(&self) -> i64 {
        self.millis.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        // 2023-11-14T22:13:20Z
        Self::at_millis(1_700_000_000_000)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.get()).unwrap_or_default()
    }
}

// ─── Stores ────────────────────────────────────────────────

/// `MemoryStore` shared between the collector and the test.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Rc<RefCell<MemoryStore>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) {
        self.inner.borrow_mut().remove(key);
    }
}

/// Store that can be read but rejects every write.
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    writes_attempted: Rc<Cell<usize>>,
}

impl FailingStore {
    pub fn writes_attempted(&self) -> usize {
        self.writes_attempted.get()
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        self.writes_attempted.set(self.writes_attempted.get() + 1);
        Err(StoreError::QuotaExceeded {
            key: key.to_string(),
        })
    }

    fn remove(&mut self, _key: &str) {}
}

// ─── Transports ────────────────────────────────────────────

/// One captured send.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub request: OutboundRequest,
    pub delivery: Delivery,
}

impl SentRequest {
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.request.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Default)]
struct TransportLog {
    sent: Vec<SentRequest>,
    attempts: usize,
    offline: bool,
}

/// Records every request. While offline, every send fails and nothing is recorded.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    log: Rc<RefCell<TransportLog>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.log.borrow_mut().offline = offline;
    }

    /// Successfully delivered requests, oldest first.
    pub fn sent(&self) -> Vec<SentRequest> {
        self.log.borrow().sent.clone()
    }

    /// Every send call, failed or not.
    pub fn attempts(&self) -> usize {
        self.log.borrow().attempts
    }

    /// `type` of every delivered event, flattening batched bodies.
    pub fn sent_event_types(&self) -> Vec<String> {
        self.sent_events()
            .iter()
            .filter_map(|e| e.get("type").and_then(|t| t.as_str()).map(str::to_string))
            .collect()
    }

    /// Every delivered envelope as raw JSON, flattening batched bodies.
    pub fn sent_events(&self) -> Vec<serde_json::Value> {
        self.sent()
            .iter()
            .flat_map(|s| {
                let body = s.body_json();
                match body.get("events").and_then(|e| e.as_array()) {
                    Some(events) => events.clone(),
                    None => vec![body],
                }
            })
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &OutboundRequest, delivery: Delivery) -> Result<(), TransportError> {
        let mut log = self.log.borrow_mut();
        log.attempts += 1;
        if log.offline {
            return Err(TransportError::network("offline"));
        }
        log.sent.push(SentRequest {
            request: request.clone(),
            delivery,
        });
        Ok(())
    }
}

/// Fails the first `failures` sends, then delegates to a recorder.
#[derive(Debug, Clone)]
pub struct FlakyTransport {
    remaining_failures: Rc<Cell<usize>>,
    recorder: RecordingTransport,
}

impl FlakyTransport {
    pub fn failing(failures: usize) -> Self {
        Self {
            remaining_failures: Rc::new(Cell::new(failures)),
            recorder: RecordingTransport::new(),
        }
    }

    pub fn recorder(&self) -> &RecordingTransport {
        &self.recorder
    }
}

impl Transport for FlakyTransport {
    fn send(&self, request: &OutboundRequest, delivery: Delivery) -> Result<(), TransportError> {
        let remaining = self.remaining_failures.get();
        if remaining > 0 {
            self.remaining_failures.set(remaining - 1);
            self.recorder.log.borrow_mut().attempts += 1;
            return Err(TransportError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.recorder.send(request, delivery)
    }
}

// ─── Page ──────────────────────────────────────────────────

#[derive(Debug)]
struct PageState {
    origin: String,
    path: String,
    title: String,
    referrer: String,
    profile: DeviceProfile,
}

/// A page whose location can be changed by the test.
#[derive(Debug, Clone)]
pub struct FakePage {
    state: Rc<RefCell<PageState>>,
}

impl FakePage {
    pub fn new(origin: &str, path: &str) -> Self {
        Self {
            state: Rc::new(RefCell::new(PageState {
                origin: origin.to_string(),
                path: path.to_string(),
                title: "Home".to_string(),
                referrer: String::new(),
                profile: DeviceProfile {
                    user_agent: Some("Mozilla/5.0 (X11; Linux x86_64) Test/1.0".to_string()),
                    language: Some("en-US".to_string()),
                    screen_width: Some(1920),
                    screen_height: Some(1080),
                    color_depth: Some(24),
                    timezone: Some("Europe/Berlin".to_string()),
                    hardware_concurrency: Some(8),
                    device_memory: Some("8".to_string()),
                },
            })),
        }
    }

    /// Move to `path` with a new title, as a history navigation would.
    pub fn navigate(&self, path: &str, title: &str) {
        let mut state = self.state.borrow_mut();
        state.path = path.to_string();
        state.title = title.to_string();
    }

    pub fn set_referrer(&self, referrer: &str) {
        self.state.borrow_mut().referrer = referrer.to_string();
    }

    pub fn set_profile(&self, profile: DeviceProfile) {
        self.state.borrow_mut().profile = profile;
    }
}

impl Default for FakePage {
    fn default() -> Self {
        Self::new("https://shop.example.com", "/")
    }
}

impl PageContext for FakePage {
    fn url(&self) -> String {
        let state = self.state.borrow();
        format!("{}{}", state.origin, state.path)
    }

    fn path(&self) -> String {
        self.state.borrow().path.clone()
    }

    fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    fn referrer(&self) -> String {
        self.state.borrow().referrer.clone()
    }

    fn device_profile(&self) -> DeviceProfile {
        self.state.borrow().profile.clone()
    }
}

// ─── Event source ──────────────────────────────────────────

#[derive(Debug, Default)]
struct Subscriptions {
    attached: Vec<HostEventKind>,
    attach_calls: usize,
    detach_calls: usize,
}

/// Remembers which listeners the collector asked for.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSource {
    subs: Rc<RefCell<Subscriptions>>,
}

impl RecordingEventSource {
    pub fn attached(&self) -> Vec<HostEventKind> {
        self.subs.borrow().attached.clone()
    }

    pub fn attach_calls(&self) -> usize {
        self.subs.borrow().attach_calls
    }

    pub fn detach_calls(&self) -> usize {
        self.subs.borrow().detach_calls
    }
}

impl EventSource for RecordingEventSource {
    fn attach(&mut self, kinds: &[HostEventKind]) {
        let mut subs = self.subs.borrow_mut();
        subs.attach_calls += 1;
        subs.attached.extend_from_slice(kinds);
    }

    fn detach(&mut self) {
        let mut subs = self.subs.borrow_mut();
        subs.detach_calls += 1;
        subs.attached.clear();
    }
}

// ─── Scheduler ─────────────────────────────────────────────

#[derive(Debug, Default)]
struct Timers {
    next_id: u64,
    active: Vec<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
}

/// Scheduler whose ticks are driven by the test.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    timers: Rc<RefCell<Timers>>,
}

impl ManualScheduler {
    pub fn active(&self) -> Vec<(TimerId, Duration)> {
        self.timers.borrow().active.clone()
    }

    pub fn cancelled(&self) -> Vec<TimerId> {
        self.timers.borrow().cancelled.clone()
    }
}

impl Scheduler for ManualScheduler {
    fn start_interval(&mut self, every: Duration) -> TimerId {
        let mut timers = self.timers.borrow_mut();
        timers.next_id += 1;
        let id = TimerId(timers.next_id);
        timers.active.push((id, every));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let mut timers = self.timers.borrow_mut();
        timers.active.retain(|(t, _)| *t != id);
        timers.cancelled.push(id);
    }
}
