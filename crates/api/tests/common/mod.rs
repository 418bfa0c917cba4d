#![allow(dead_code)]

use std::sync::Arc;

use civic_api::actions::cities;
use civic_api::config::AppConfig;
use civic_api::state::AppState;
use civic_core::identity::Actor;
use civic_core::roles::CityRole;
use civic_core::types::new_id;
use civic_db::models::city::{City, CreateCity};
use civic_events::{DomainEvent, EventBus, EventEnvelope};
use tokio::sync::broadcast;

/// Build a test `AppConfig` with short timeouts.
pub fn test_config() -> AppConfig {
    AppConfig {
        handler_timeout_ms: 500,
        shutdown_grace_secs: 1,
        ..AppConfig::default()
    }
}

/// Fresh store, all production listeners installed.
pub fn test_state() -> AppState {
    AppState::bootstrap(test_config(), civic_db::create_pool())
}

/// Fresh store with a caller-supplied bus.
pub fn state_with_bus(event_bus: EventBus) -> AppState {
    AppState {
        pool: civic_db::create_pool(),
        config: Arc::new(test_config()),
        event_bus: Arc::new(event_bus),
    }
}

pub fn platform_admin() -> Actor {
    Actor::new(new_id(), "ops@example.org").with_platform_admin()
}

pub fn user(email: &str) -> Actor {
    Actor::new(new_id(), email)
}

/// Provision a city; `admin` becomes its city admin.
pub async fn seed_city(state: &AppState, admin: &Actor, name: &str) -> City {
    cities::create_city(
        state,
        admin,
        &CreateCity {
            name: name.to_string(),
            slug: None,
        },
    )
    .await
    .expect("city should be created")
}

/// Add `actor` to `city` with the given role.
pub async fn grant_role(state: &AppState, admin: &Actor, city: &City, actor: &Actor, role: CityRole) {
    cities::join_city(state, actor, city.id)
        .await
        .expect("join should succeed");
    cities::set_member_role(state, admin, city.id, actor.user_id, role)
        .await
        .expect("role change should succeed");
}

/// Drain everything currently buffered on a tap.
pub fn drain(tap: &mut broadcast::Receiver<EventEnvelope>) -> Vec<DomainEvent> {
    let mut events = Vec::new();
    while let Ok(envelope) = tap.try_recv() {
        events.push(envelope.event);
    }
    events
}
