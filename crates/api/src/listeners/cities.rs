//! Reactions to tenant provisioning and membership changes.

use civic_events::{CityCreated, EventRegistry, UserJoinedCity};

pub fn register_city_listeners(registry: &mut EventRegistry) {
    registry.subscribe("cities.provisioned", |event: CityCreated| async move {
        tracing::info!(city_id = %event.city_id, slug = %event.slug, "City provisioned");
        Ok(())
    });

    registry.subscribe("cities.member_joined", |event: UserJoinedCity| async move {
        tracing::info!(user_id = %event.user_id, city_id = %event.city_id, "User joined city");
        Ok(())
    });
}
