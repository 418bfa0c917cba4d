use std::sync::Arc;

use civic_db::DbPool;
use civic_events::{EventBus, EventRegistry};

use crate::config::AppConfig;
use crate::listeners;

/// Shared application state handed to every action.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Data store handle.
    pub pool: DbPool,
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Sealed event bus; every listener group is installed before it exists.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Install all feature listeners, seal the bus, and assemble the state.
    pub fn bootstrap(config: AppConfig, pool: DbPool) -> Self {
        let mut registry = EventRegistry::new();
        listeners::initialize_all_listeners(&mut registry);
        let event_bus = registry.seal(config.dispatch());

        Self {
            pool,
            config: Arc::new(config),
            event_bus: Arc::new(event_bus),
        }
    }
}
