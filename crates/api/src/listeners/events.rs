//! Reactions to community events being scheduled.

use civic_events::{EventCreated, EventRegistry};

pub fn register_event_listeners(registry: &mut EventRegistry) {
    registry.subscribe("events.scheduled", |event: EventCreated| async move {
        tracing::info!(event_id = %event.event_id, city_id = %event.city_id, "Community event created");
        Ok(())
    });
}
