//! Startup-time subscription table.
//!
//! [`EventRegistry`] is the only place subscriptions can be added. It is
//! mutated during process initialization and then consumed by
//! [`EventRegistry::seal`], which hands the table to a read-only
//! [`EventBus`]. There is no way to subscribe once traffic is flowing.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use crate::bus::{DispatchConfig, EventBus};
use crate::event::{Event, EventKind};
use crate::handler::{ErasedHandler, EventHandler, FnHandler, HandlerResult, TypedHandler};

/// One registered handler.
#[derive(Clone)]
pub(crate) struct Subscription {
    /// Label used in logs, e.g. `"newsletter"`.
    pub listener: &'static str,
    pub handler: Arc<dyn ErasedHandler>,
}

/// Ordered handlers per event kind, plus the set of installed listener
/// groups.
#[derive(Default)]
pub struct EventRegistry {
    subscriptions: HashMap<EventKind, Vec<Subscription>>,
    installed: HashSet<&'static str>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closure handler for payload type `E`.
    ///
    /// Handlers for the same kind are kept in registration order. There is
    /// no duplicate detection: subscribing the same closure twice runs it
    /// twice. Use [`install`](Self::install) to make a group of
    /// subscriptions idempotent.
    pub fn subscribe<E, F, Fut>(&mut self, listener: &'static str, handler: F)
    where
        E: Event,
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.subscribe_handler::<E, _>(listener, FnHandler(handler));
    }

    /// Append an [`EventHandler`] implementation for payload type `E`.
    pub fn subscribe_handler<E, H>(&mut self, listener: &'static str, handler: H)
    where
        E: Event,
        H: EventHandler<E>,
    {
        let kind = E::KIND;
        tracing::debug!(event = %kind, listener, "Subscribed event handler");
        self.subscriptions
            .entry(kind)
            .or_default()
            .push(Subscription {
                listener,
                handler: Arc::new(TypedHandler::<E, H>::new(handler)),
            });
    }

    /// Run `register` unless a group with the same name was already
    /// installed.
    ///
    /// Returns `true` if `register` ran.
    pub fn install(&mut self, group: &'static str, register: impl FnOnce(&mut Self)) -> bool {
        if !self.installed.insert(group) {
            tracing::debug!(group, "Listener group already installed, skipping");
            return false;
        }
        register(self);
        true
    }

    pub fn is_installed(&self, group: &str) -> bool {
        self.installed.contains(group)
    }

    /// Number of handlers subscribed to `kind`.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.subscriptions.get(&kind).map_or(0, Vec::len)
    }

    /// Freeze the table and build the dispatcher.
    pub fn seal(self, config: DispatchConfig) -> EventBus {
        let total: usize = self.subscriptions.values().map(Vec::len).sum();
        tracing::info!(
            handlers = total,
            groups = self.installed.len(),
            "Event registry sealed"
        );
        EventBus::from_subscriptions(self.subscriptions, config)
    }
}
