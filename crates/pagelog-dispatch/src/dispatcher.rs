//! Dispatcher: turns produced events into transport requests.
//!
//! In batched mode a flush swaps the whole queue out and sends it as one
//! request. On failure the batch is put back at the head of the queue, so
//! the next flush retries it ahead of anything newer. Hosts whose sends
//! complete asynchronously use [`Dispatcher::begin_flush`] and
//! [`Dispatcher::complete`]; events submitted in between queue normally.
//! With [`SendCompletion::Host`] every flush the dispatcher would start on
//! its own (size threshold, timer, shutdown) is reported as
//! [`FlushOutcome::Due`] instead of being sent inline.

use pagelog_core::config::{
    DispatchConfig, DispatchMode, PageLogConfig, SendCompletion, TransportConfig,
};
use pagelog_core::errors::TransportError;
use pagelog_core::traits::{Delivery, OutboundRequest, Transport};
use pagelog_events::{encode_envelope, BatchRequest, Envelope};
use pagelog_observability::tracing_setup::events;

use crate::queue::PendingQueue;
use crate::stats::DispatchStats;

/// Header fields stamped on every batched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchContext {
    pub session_id: String,
    pub user_agent: String,
    pub user_id: Option<String>,
}

/// What a flush or a single submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing was pending.
    Empty,
    /// Still queued; the threshold was not reached.
    Queued,
    /// A flush is due but left to the host (`SendCompletion::Host`).
    Due { count: usize },
    Sent { count: usize },
    /// The send failed and the events are back at the head of the queue.
    Requeued { count: usize },
    /// The events are gone (immediate-mode failure or unencodable body).
    Dropped { count: usize },
}

/// A batch taken off the queue and not yet acknowledged.
#[derive(Debug)]
#[must_use = "an in-flight batch must be passed back to Dispatcher::complete"]
pub struct InFlightBatch {
    events: Vec<Envelope>,
    request: OutboundRequest,
    delivery: Delivery,
}

impl InFlightBatch {
    pub fn request(&self) -> &OutboundRequest {
        &self.request
    }

    /// How the host should send this batch.
    pub fn delivery(&self) -> Delivery {
        self.delivery
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Envelope] {
        &self.events
    }
}

pub struct Dispatcher {
    transport: Box<dyn Transport>,
    endpoint: String,
    client_token: Option<String>,
    mode: DispatchMode,
    completion: SendCompletion,
    max_batch_size: usize,
    queue: PendingQueue,
    stats: DispatchStats,
}

impl Dispatcher {
    pub fn new(
        transport: Box<dyn Transport>,
        transport_config: &TransportConfig,
        dispatch_config: &DispatchConfig,
    ) -> Self {
        Self {
            transport,
            endpoint: transport_config.endpoint.clone(),
            client_token: transport_config.client_token.clone(),
            mode: dispatch_config.mode,
            completion: dispatch_config.completion,
            max_batch_size: dispatch_config.max_batch_size.max(1),
            queue: PendingQueue::new(dispatch_config.max_queue_size),
            stats: DispatchStats::default(),
        }
    }

    pub fn from_config(transport: Box<dyn Transport>, config: &PageLogConfig) -> Self {
        Self::new(transport, &config.transport, &config.dispatch)
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn completion(&self) -> SendCompletion {
        self.completion
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Envelope> {
        self.queue.iter()
    }

    /// True when the queue has reached the batch size and the host settles sends.
    pub fn flush_due(&self) -> bool {
        self.mode == DispatchMode::Batched
            && self.completion == SendCompletion::Host
            && self.queue.len() >= self.max_batch_size
    }

    /// Accept one produced event.
    ///
    /// Batched: queue it, flushing when the queue reaches the batch size.
    /// Immediate: send it as its own request right away.
    pub fn submit(&mut self, envelope: Envelope, ctx: &BatchContext, now_ms: u64) -> FlushOutcome {
        match self.mode {
            DispatchMode::Immediate => self.send_single(envelope, ctx),
            DispatchMode::Batched => {
                let dropped = self.queue.push(envelope);
                self.record_overflow(dropped);
                if self.queue.len() >= self.max_batch_size {
                    self.flush(ctx, now_ms, Delivery::Deferred)
                } else {
                    FlushOutcome::Queued
                }
            }
        }
    }

    /// Send everything pending as one batch and settle the outcome.
    ///
    /// Under [`SendCompletion::Host`] nothing is sent: the pending count is
    /// reported as [`FlushOutcome::Due`] for the host to pick up.
    pub fn flush(&mut self, ctx: &BatchContext, now_ms: u64, delivery: Delivery) -> FlushOutcome {
        if self.completion == SendCompletion::Host {
            return match self.queue.len() {
                0 => FlushOutcome::Empty,
                count => FlushOutcome::Due { count },
            };
        }
        let Some(batch) = self.begin_flush(ctx, now_ms, delivery) else {
            return FlushOutcome::Empty;
        };
        let _span = pagelog_observability::flush_span!(batch.len(), delivery).entered();
        let result = self.transport.send(&batch.request, delivery);
        self.complete(batch, result)
    }

    /// Take the whole queue as one batch. Returns `None` when nothing is pending.
    ///
    /// The queue is empty afterwards; events submitted before [`complete`]
    /// is called land behind the in-flight batch if it fails.
    ///
    /// [`complete`]: Dispatcher::complete
    pub fn begin_flush(
        &mut self,
        ctx: &BatchContext,
        now_ms: u64,
        delivery: Delivery,
    ) -> Option<InFlightBatch> {
        if self.queue.is_empty() {
            return None;
        }
        let events = self.queue.take_batch();
        let request = BatchRequest {
            events,
            session_id: ctx.session_id.clone(),
            timestamp: now_ms,
            user_agent: ctx.user_agent.clone(),
            user_id: ctx.user_id.clone(),
        };
        let body = match request.encode() {
            Ok(body) => body,
            Err(e) => {
                // Not re-queued; the body would fail to encode again.
                let count = request.events.len();
                events::events_dropped(count, &e.to_string());
                self.stats.events_dropped += count as u64;
                return None;
            }
        };
        Some(InFlightBatch {
            events: request.events,
            request: self.outbound(body, ctx),
            delivery,
        })
    }

    /// Settle a batch taken by [`Dispatcher::begin_flush`].
    pub fn complete(
        &mut self,
        batch: InFlightBatch,
        result: Result<(), TransportError>,
    ) -> FlushOutcome {
        let count = batch.events.len();
        match result {
            Ok(()) => {
                self.stats.requests_sent += 1;
                self.stats.events_sent += count as u64;
                events::batch_sent(count);
                FlushOutcome::Sent { count }
            }
            Err(e) => {
                self.stats.failed_attempts += 1;
                self.stats.events_requeued += count as u64;
                events::batch_requeued(count, &e.to_string());
                let dropped = self.queue.requeue_front(batch.events);
                self.record_overflow(dropped);
                FlushOutcome::Requeued { count }
            }
        }
    }

    fn send_single(&mut self, envelope: Envelope, ctx: &BatchContext) -> FlushOutcome {
        let result = encode_envelope(&envelope)
            .and_then(|body| self.transport.send(&self.outbound(body, ctx), Delivery::Deferred));
        match result {
            Ok(()) => {
                self.stats.requests_sent += 1;
                self.stats.events_sent += 1;
                events::batch_sent(1);
                FlushOutcome::Sent { count: 1 }
            }
            Err(e) => {
                self.stats.failed_attempts += 1;
                self.stats.events_dropped += 1;
                events::events_dropped(1, &e.to_string());
                FlushOutcome::Dropped { count: 1 }
            }
        }
    }

    fn outbound(&self, body: String, ctx: &BatchContext) -> OutboundRequest {
        OutboundRequest {
            endpoint: self.endpoint.clone(),
            body,
            client_token: self.client_token.clone(),
            user_id: ctx.user_id.clone(),
        }
    }

    fn record_overflow(&mut self, dropped: usize) {
        if dropped > 0 {
            self.stats.events_dropped += dropped as u64;
            events::events_dropped(dropped, "pending queue full, oldest events discarded");
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("endpoint", &self.endpoint)
            .field("mode", &self.mode)
            .field("completion", &self.completion)
            .field("max_batch_size", &self.max_batch_size)
            .field("pending", &self.queue.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
