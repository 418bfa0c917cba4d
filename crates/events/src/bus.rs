//! Sealed in-process event dispatcher.
//!
//! [`EventBus`] is built once by [`EventRegistry::seal`](crate::EventRegistry::seal)
//! and shared via `Arc<EventBus>`. Its subscription table is read-only, so
//! publishing takes no locks.
//!
//! Every handler invocation is isolated: an `Err`, a panic, or exceeding
//! [`DispatchConfig::handler_timeout`] is logged and counted, and never
//! reaches the publisher or the other handlers of the same event.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::broadcast;
use tokio_util::task::TaskTracker;

use crate::event::{DomainEvent, EventEnvelope, EventKind};
use crate::handler::HandlerResult;
use crate::registry::Subscription;

/// Default upper bound for a single handler invocation.
const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time [`EventBus::shutdown`] waits for in-flight handlers.
const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Default buffer capacity for the tap broadcast channel.
const DEFAULT_TAP_CAPACITY: usize = 1024;

// ---------------------------------------------------------------------------
// DispatchConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for dispatch.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Upper bound on a single handler invocation.
    pub handler_timeout: Duration,
    /// How long [`EventBus::shutdown`] waits for in-flight handlers.
    pub shutdown_grace: Duration,
    /// Buffer size of the tap channel. Slow tap receivers observe
    /// `RecvError::Lagged` once it fills.
    pub tap_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            handler_timeout: DEFAULT_HANDLER_TIMEOUT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            tap_capacity: DEFAULT_TAP_CAPACITY,
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchReport
// ---------------------------------------------------------------------------

/// Outcome of a single handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Succeeded,
    Failed,
    Panicked,
    TimedOut,
}

/// Per-handler outcome counts of one [`EventBus::publish_and_wait`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub panicked: usize,
    pub timed_out: usize,
}

impl DispatchReport {
    /// Number of handlers that were invoked.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.panicked + self.timed_out
    }

    /// `true` if every invoked handler returned `Ok`.
    pub fn is_clean(&self) -> bool {
        self.total() == self.succeeded
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Succeeded => self.succeeded += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Panicked => self.panicked += 1,
            Outcome::TimedOut => self.timed_out += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// In-process dispatcher over a frozen subscription table.
///
/// # Usage
///
/// ```rust
/// use civic_events::{DispatchConfig, EventRegistry, UserCreated};
///
/// # async fn demo() {
/// let mut registry = EventRegistry::new();
/// registry.subscribe("welcome", |event: UserCreated| async move {
///     tracing::info!(email = %event.email, "Welcome!");
///     Ok(())
/// });
/// let bus = registry.seal(DispatchConfig::default());
///
/// bus.publish(UserCreated {
///     user_id: uuid::Uuid::now_v7(),
///     email: "ana@example.org".into(),
/// });
/// bus.shutdown().await;
/// # }
/// ```
pub struct EventBus {
    subscriptions: HashMap<EventKind, Vec<Subscription>>,
    config: DispatchConfig,
    tracker: TaskTracker,
    tap: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub(crate) fn from_subscriptions(
        subscriptions: HashMap<EventKind, Vec<Subscription>>,
        config: DispatchConfig,
    ) -> Self {
        let (tap, _) = broadcast::channel(config.tap_capacity.max(1));
        Self {
            subscriptions,
            config,
            tracker: TaskTracker::new(),
            tap,
        }
    }

    /// A bus with no subscribers.
    pub fn empty(config: DispatchConfig) -> Self {
        Self::from_subscriptions(HashMap::new(), config)
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Number of handlers subscribed to `kind`.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.subscribers(kind).len()
    }

    /// Receive every envelope published from now on, regardless of kind.
    pub fn tap(&self) -> broadcast::Receiver<EventEnvelope> {
        self.tap.subscribe()
    }

    /// Publish an event without waiting for its handlers.
    ///
    /// Each handler is spawned as its own tracked task and the call returns
    /// immediately. There is no ordering between the handlers of one event.
    /// Never fails: an event with no subscribers is a no-op, and an event
    /// published outside a tokio runtime or after [`shutdown`](Self::shutdown)
    /// is logged and dropped.
    pub fn publish(&self, event: impl Into<DomainEvent>) {
        let envelope = self.stamp(event.into());
        let kind = envelope.kind();

        let subscribers = self.subscribers(kind);
        if subscribers.is_empty() {
            tracing::trace!(event = %kind, "No subscribers for event");
            return;
        }

        if self.tracker.is_closed() {
            tracing::warn!(event = %kind, event_id = %envelope.id, "Event published after bus shutdown, dropping");
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(event = %kind, error = %e, "Event published outside a tokio runtime, dropping");
                return;
            }
        };

        for subscription in subscribers {
            let Some(future) = subscription.handler.call(&envelope.event) else {
                continue;
            };
            self.tracker.spawn_on(
                invoke(
                    kind,
                    subscription.listener,
                    envelope.id,
                    future,
                    self.config.handler_timeout,
                ),
                &runtime,
            );
        }
    }

    /// Publish an event and run its handlers one after another, in
    /// registration order, before returning.
    ///
    /// Handler failures are isolated exactly as in [`publish`](Self::publish);
    /// the returned report says how each handler ended.
    pub async fn publish_and_wait(&self, event: impl Into<DomainEvent>) -> DispatchReport {
        let envelope = self.stamp(event.into());
        let kind = envelope.kind();
        let mut report = DispatchReport::default();

        for subscription in self.subscribers(kind) {
            let Some(future) = subscription.handler.call(&envelope.event) else {
                continue;
            };
            let outcome = invoke(
                kind,
                subscription.listener,
                envelope.id,
                future,
                self.config.handler_timeout,
            )
            .await;
            report.record(outcome);
        }

        report
    }

    /// Stop accepting new handler tasks and wait for in-flight ones.
    ///
    /// Waits at most [`DispatchConfig::shutdown_grace`]. Returns `true` if
    /// every handler finished in time.
    pub async fn shutdown(&self) -> bool {
        self.tracker.close();
        let in_flight = self.tracker.len();
        tracing::info!(in_flight, "Event bus shutting down");

        match tokio::time::timeout(self.config.shutdown_grace, self.tracker.wait()).await {
            Ok(()) => {
                tracing::info!("Event bus drained");
                true
            }
            Err(_) => {
                tracing::warn!(
                    remaining = self.tracker.len(),
                    grace_ms = self.config.shutdown_grace.as_millis() as u64,
                    "Event handlers still running after shutdown grace period"
                );
                false
            }
        }
    }

    fn subscribers(&self, kind: EventKind) -> &[Subscription] {
        self.subscriptions
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Wrap the event in an envelope and copy it to the tap.
    fn stamp(&self, event: DomainEvent) -> EventEnvelope {
        let envelope = EventEnvelope::new(event);
        tracing::debug!(event = %envelope.kind(), event_id = %envelope.id, "Publishing event");
        // A SendError only means nobody is tapping the bus.
        let _ = self.tap.send(envelope.clone());
        envelope
    }
}

// ---------------------------------------------------------------------------
// Isolation
// ---------------------------------------------------------------------------

/// Run one handler future with panic capture and a timeout, logging any
/// failure.
async fn invoke(
    kind: EventKind,
    listener: &'static str,
    event_id: uuid::Uuid,
    future: BoxFuture<'static, HandlerResult>,
    timeout: Duration,
) -> Outcome {
    let guarded = AssertUnwindSafe(future).catch_unwind();

    match tokio::time::timeout(timeout, guarded).await {
        Ok(Ok(Ok(()))) => {
            tracing::trace!(event = %kind, listener, %event_id, "Event handler completed");
            Outcome::Succeeded
        }
        Ok(Ok(Err(e))) => {
            tracing::error!(event = %kind, listener, %event_id, error = %e, "Event handler failed");
            Outcome::Failed
        }
        Ok(Err(panic)) => {
            tracing::error!(
                event = %kind,
                listener,
                %event_id,
                panic = %panic_message(panic.as_ref()),
                "Event handler panicked"
            );
            Outcome::Panicked
        }
        Err(_) => {
            tracing::warn!(
                event = %kind,
                listener,
                %event_id,
                timeout_ms = timeout.as_millis() as u64,
                "Event handler timed out"
            );
            Outcome::TimedOut
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
