//! Handler trait and the type-erased form stored in the registry.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::event::{DomainEvent, Event};

/// Error returned by a handler. Logged by the bus, never propagated.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

pub type HandlerResult = Result<(), HandlerError>;

/// Reacts to one payload type.
///
/// Closures `Fn(E) -> impl Future<Output = HandlerResult>` are registered
/// with [`EventRegistry::subscribe`](crate::EventRegistry::subscribe); types
/// that carry their own state can implement this trait and register with
/// [`EventRegistry::subscribe_handler`](crate::EventRegistry::subscribe_handler).
#[async_trait]
pub trait EventHandler<E: Event>: Send + Sync + 'static {
    async fn handle(&self, event: E) -> HandlerResult;
}

/// Adapts a closure to [`EventHandler`].
pub(crate) struct FnHandler<F>(pub F);

#[async_trait]
impl<E, F, Fut> EventHandler<E> for FnHandler<F>
where
    E: Event,
    F: Fn(E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, event: E) -> HandlerResult {
        (self.0)(event).await
    }
}

// ---------------------------------------------------------------------------
// Type erasure
// ---------------------------------------------------------------------------

/// A handler with its payload type erased so handlers of every kind can
/// live in one table.
pub(crate) trait ErasedHandler: Send + Sync {
    /// Build the handler future for `event`.
    ///
    /// Returns `None` if the event is not of the handler's kind. The
    /// returned future owns its inputs and does no work until polled.
    fn call(&self, event: &DomainEvent) -> Option<BoxFuture<'static, HandlerResult>>;
}

pub(crate) struct TypedHandler<E, H> {
    handler: Arc<H>,
    _payload: PhantomData<fn(E)>,
}

impl<E, H> TypedHandler<E, H> {
    pub(crate) fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
            _payload: PhantomData,
        }
    }
}

impl<E, H> ErasedHandler for TypedHandler<E, H>
where
    E: Event,
    H: EventHandler<E>,
{
    fn call(&self, event: &DomainEvent) -> Option<BoxFuture<'static, HandlerResult>> {
        let payload = E::from_domain(event)?.clone();
        let handler = Arc::clone(&self.handler);
        Some(Box::pin(async move { handler.handle(payload).await }))
    }
}
