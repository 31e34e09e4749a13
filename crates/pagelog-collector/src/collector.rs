//! The collector: session and view lifecycle, action capture, flush control.

use pagelog_core::config::{DispatchMode, PageLogConfig};
use pagelog_core::constants::UNKNOWN_FIELD;
use pagelog_core::errors::TransportError;
use pagelog_core::models::{FormDescriptor, HostEvent, HostEventKind, TargetDescriptor};
use pagelog_core::traits::{
    Clock, Delivery, EventSource, KeyValueStore, PageContext, Scheduler, TimerId,
};
use pagelog_dispatch::{BatchContext, DispatchStats, Dispatcher, FlushOutcome, InFlightBatch};
use pagelog_events::{epoch_millis, Action, ActionKind, Envelope, ViewStart};
use pagelog_observability::tracing_setup::events;
use pagelog_session::{generate_fingerprint, resolve_session_id, Session, ViewTracker};

use crate::host::Host;
use crate::lifecycle::LifecycleState;
use crate::targets;

/// One collector per page, constructed and owned by the embedding adapter.
pub struct Collector {
    config: PageLogConfig,
    clock: Box<dyn Clock>,
    store: Box<dyn KeyValueStore>,
    page: Box<dyn PageContext>,
    listeners: Box<dyn EventSource>,
    scheduler: Box<dyn Scheduler>,
    dispatcher: Dispatcher,
    state: LifecycleState,
    session: Option<Session>,
    views: ViewTracker,
    flush_timer: Option<TimerId>,
    /// Shutdown flush left to the host, with the delivery it asked for.
    final_flush: Option<Delivery>,
    user_id: Option<String>,
    user_agent: String,
}

impl Collector {
    pub fn new(config: PageLogConfig, host: Host) -> Self {
        let dispatcher = Dispatcher::from_config(host.transport, &config);
        let user_id = config.collector.user_id.clone();
        Self {
            config,
            clock: host.clock,
            store: host.store,
            page: host.page,
            listeners: host.events,
            scheduler: host.scheduler,
            dispatcher,
            state: LifecycleState::Uninitialized,
            session: None,
            views: ViewTracker::new(),
            flush_timer: None,
            final_flush: None,
            user_id,
            user_agent: UNKNOWN_FIELD.to_string(),
        }
    }

    /// Construct and, when `collector.auto_init` is set, initialize right away.
    pub fn start(config: PageLogConfig, host: Host) -> Self {
        let auto_init = config.collector.auto_init;
        let mut collector = Self::new(config, host);
        if auto_init {
            collector.init();
        }
        collector
    }

    // ─── Lifecycle ──────────────────────────────────────────

    /// Start the session, subscribe to page events, start the flush timer and
    /// open the first view. Only the first call does anything.
    pub fn init(&mut self) {
        if self.state != LifecycleState::Uninitialized {
            events::lifecycle_ignored("init", self.state.as_str());
            return;
        }

        let lookup = resolve_session_id(self.store.as_mut(), self.clock.as_ref());
        let profile = self.page.device_profile();
        let fingerprint = generate_fingerprint(&profile);
        self.user_agent = profile
            .user_agent
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());

        let now = self.now_ms();
        let session = Session::start(
            lookup.session_id,
            fingerprint,
            non_empty(self.page.referrer()),
            now,
        );
        let _span = pagelog_observability::lifecycle_span!("init", session.session_id).entered();
        events::session_started(&session.session_id, lookup.reused);

        let start = Envelope::SessionStart(session.start_event());
        self.session = Some(session);
        self.state = LifecycleState::Initialized;
        self.emit(start);

        self.listeners.attach(&HostEventKind::ALL);
        if self.dispatcher.mode() == DispatchMode::Batched {
            let every = self.config.dispatch.flush_interval();
            self.flush_timer = Some(self.scheduler.start_interval(every));
        }

        self.track_page_view_start();
    }

    /// Close the open view and the session, stop the timer, unsubscribe and
    /// send whatever is pending. Repeated calls emit nothing.
    pub fn destroy(&mut self) {
        self.shutdown("destroy", Delivery::Deferred);
    }

    fn shutdown(&mut self, operation: &str, delivery: Delivery) {
        if self.state != LifecycleState::Initialized {
            events::lifecycle_ignored(operation, self.state.as_str());
            return;
        }
        let _span =
            pagelog_observability::lifecycle_span!(operation, self.session_id()).entered();

        self.track_page_view_end();

        let now = self.now_ms();
        let end = self.session.as_mut().and_then(|session| {
            if !session.close(now) {
                return None;
            }
            events::session_ended(
                &session.session_id,
                session.view_count,
                session.action_count,
                session.time_spent,
            );
            session.end_event()
        });
        if let Some(end) = end {
            self.emit(Envelope::SessionEnd(end));
        }

        if let Some(timer) = self.flush_timer.take() {
            self.scheduler.cancel(timer);
        }
        self.listeners.detach();

        let ctx = self.batch_context();
        if let FlushOutcome::Due { .. } = self.dispatcher.flush(&ctx, now, delivery) {
            self.final_flush = Some(delivery);
        }
        self.state = LifecycleState::Destroyed;
    }

    // ─── Views ──────────────────────────────────────────────

    /// Open a view for the page's current location. Ignored while a view is
    /// already open; callers close the previous one first.
    pub fn track_page_view_start(&mut self) {
        if !self.state.is_active() {
            events::lifecycle_ignored("track_page_view_start", self.state.as_str());
            return;
        }
        if self.views.is_open() {
            events::lifecycle_ignored("track_page_view_start", "a view is already open");
            return;
        }

        let view = ViewStart {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: self.session_id().to_string(),
            path: self.page.path(),
            url: self.page.url(),
            start_timestamp: self.now_ms(),
            title: non_empty(self.page.title()),
            referrer: non_empty(self.page.referrer()),
        };
        self.views.open(view.clone());
        if let Some(session) = self.session.as_mut() {
            session.record_view();
        }
        events::view_opened(&view.id, &view.path);
        self.emit(Envelope::ViewStart(view));
    }

    /// Close the open view. No-op when none is open.
    pub fn track_page_view_end(&mut self) {
        if !self.state.is_active() {
            events::lifecycle_ignored("track_page_view_end", self.state.as_str());
            return;
        }
        let now = self.now_ms();
        let Some(end) = self.views.close(now) else {
            events::lifecycle_ignored("track_page_view_end", "no open view");
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.add_time_spent(end.time_spent);
        }
        events::view_closed(&end.id, end.time_spent);
        self.emit(Envelope::ViewEnd(end));
    }

    // ─── Actions ────────────────────────────────────────────

    pub fn handle_click(&mut self, target: &TargetDescriptor) {
        self.record_action("handle_click", ActionKind::Click, targets::click_target(target));
    }

    pub fn handle_form_submit(&mut self, form: &FormDescriptor) {
        self.record_action(
            "handle_form_submit",
            ActionKind::FormSubmit,
            targets::form_target(form),
        );
    }

    fn record_action(&mut self, operation: &str, kind: ActionKind, target: String) {
        if !self.state.is_active() {
            events::lifecycle_ignored(operation, self.state.as_str());
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.record_action();
        }
        let action = Action {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: self.session_id().to_string(),
            kind,
            timestamp: self.now_ms(),
            target: Some(target),
        };
        self.emit(Envelope::Action(action));
    }

    /// Route a forwarded page event.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Click(target) => self.handle_click(&target),
            HostEvent::FormSubmit(form) => self.handle_form_submit(&form),
            HostEvent::Navigation => {
                self.track_page_view_end();
                self.track_page_view_start();
            }
            HostEvent::Unload => self.shutdown("unload", Delivery::Beacon),
        }
    }

    // ─── Dispatch ───────────────────────────────────────────

    /// Timer tick from the host scheduler.
    pub fn on_flush_timer(&mut self) -> FlushOutcome {
        self.flush()
    }

    /// Send everything pending now. No-op outside the initialized state.
    pub fn flush(&mut self) -> FlushOutcome {
        if !self.state.is_active() {
            events::lifecycle_ignored("flush", self.state.as_str());
            return FlushOutcome::Empty;
        }
        let ctx = self.batch_context();
        let now = self.now_ms();
        self.dispatcher.flush(&ctx, now, Delivery::Deferred)
    }

    /// Whether the host should call [`Collector::begin_flush`] now.
    ///
    /// Only ever true under `SendCompletion::Host`: the batch threshold was
    /// reached, or a shutdown flush is still owed.
    pub fn flush_due(&self) -> bool {
        self.final_flush.is_some() || (self.state.is_active() && self.dispatcher.flush_due())
    }

    /// Take everything pending as one batch for the host to send.
    ///
    /// After destroy or unload this yields the final batch once, carrying the
    /// shutdown's delivery, then `None`.
    pub fn begin_flush(&mut self) -> Option<InFlightBatch> {
        let delivery = match self.state {
            LifecycleState::Initialized => Delivery::Deferred,
            LifecycleState::Destroyed => self.final_flush.take()?,
            LifecycleState::Uninitialized => {
                events::lifecycle_ignored("begin_flush", self.state.as_str());
                return None;
            }
        };
        let ctx = self.batch_context();
        let now = self.now_ms();
        self.dispatcher.begin_flush(&ctx, now, delivery)
    }

    /// Report the result of sending a batch from [`Collector::begin_flush`].
    pub fn complete_flush(
        &mut self,
        batch: InFlightBatch,
        result: Result<(), TransportError>,
    ) -> FlushOutcome {
        self.dispatcher.complete(batch, result)
    }

    /// Attach a user id to every request sent from now on.
    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into()).filter(|id| !id.is_empty());
    }

    fn emit(&mut self, envelope: Envelope) {
        let ctx = self.batch_context();
        let now = self.now_ms();
        self.dispatcher.submit(envelope, &ctx, now);
    }

    fn batch_context(&self) -> BatchContext {
        BatchContext {
            session_id: self.session_id().to_string(),
            user_agent: self.user_agent.clone(),
            user_id: self.user_id.clone(),
        }
    }

    fn now_ms(&self) -> u64 {
        epoch_millis(self.clock.now())
    }

    // ─── Accessors ──────────────────────────────────────────

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn config(&self) -> &PageLogConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Current session id; empty before `init`.
    pub fn session_id(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.session_id.as_str())
            .unwrap_or_default()
    }

    pub fn current_view(&self) -> Option<&ViewStart> {
        self.views.current()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn pending_len(&self) -> usize {
        self.dispatcher.pending_len()
    }

    pub fn dispatch_stats(&self) -> DispatchStats {
        self.dispatcher.stats()
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("state", &self.state)
            .field("session", &self.session)
            .field("current_view", &self.views.current())
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}
