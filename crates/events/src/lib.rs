//! Civic in-process event bus.
//!
//! This crate lets the operation that changes state stay ignorant of the
//! features that react to the change:
//!
//! - [`DomainEvent`]: closed set of event kinds, each with its own
//!   strongly-typed payload ([`UserCreated`], [`PostPublished`], ...).
//! - [`EventRegistry`]: startup-time subscription table. Feature modules
//!   register handlers here, grouped so installation is idempotent.
//! - [`EventBus`]: the sealed, read-only dispatcher produced by
//!   [`EventRegistry::seal`]. Publishing never fails; every handler runs
//!   isolated with a timeout.
//! - [`EventAudit`]: background consumer of the bus tap that logs every
//!   published envelope.

pub mod audit;
pub mod bus;
pub mod event;
pub mod handler;
pub mod registry;

pub use audit::EventAudit;
pub use bus::{DispatchConfig, DispatchReport, EventBus};
pub use event::{
    CityCreated, DomainEvent, Event, EventCreated, EventEnvelope, EventKind, PostPublished,
    SubscriberAdded, SubscriberRemoved, UnknownEventKind, UserCreated, UserJoinedCity,
};
pub use handler::{EventHandler, HandlerError, HandlerResult};
pub use registry::EventRegistry;
