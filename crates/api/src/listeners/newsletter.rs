//! Newsletter audience bookkeeping.

use civic_events::{EventRegistry, SubscriberAdded, SubscriberRemoved};

pub fn register_newsletter_listeners(registry: &mut EventRegistry) {
    registry.subscribe("newsletter.added", |event: SubscriberAdded| async move {
        tracing::info!(email = %event.email, city_id = %event.city_id, "Newsletter subscriber added");
        Ok(())
    });

    registry.subscribe("newsletter.removed", |event: SubscriberRemoved| async move {
        tracing::info!(email = %event.email, city_id = %event.city_id, "Newsletter subscriber removed");
        Ok(())
    });
}
