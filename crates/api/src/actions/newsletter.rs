//! Newsletter subscription management.
//!
//! Both operations are open to anonymous visitors; the email address is
//! the only identity involved.

use civic_core::types::EntityId;
use civic_core::validation::normalize_email;
use civic_db::repositories::SubscriberRepo;
use civic_events::{SubscriberAdded, SubscriberRemoved};

use crate::actions::require_city;
use crate::error::AppResult;
use crate::state::AppState;

/// Subscribe an email to a city's newsletter.
///
/// Returns `true` if a new subscription was created. Subscribing twice is
/// not an error and publishes nothing the second time.
pub async fn subscribe(state: &AppState, city_id: EntityId, email: &str) -> AppResult<bool> {
    require_city(state, city_id).await?;
    let email = normalize_email(email)?;

    let Some(subscriber) = SubscriberRepo::create_if_absent(&state.pool, city_id, &email).await?
    else {
        return Ok(false);
    };

    state.event_bus.publish(SubscriberAdded {
        email: subscriber.email,
        city_id,
    });
    Ok(true)
}

/// Remove an email from a city's newsletter.
///
/// Returns `true` if a subscription existed.
pub async fn unsubscribe(state: &AppState, city_id: EntityId, email: &str) -> AppResult<bool> {
    let email = normalize_email(email)?;

    let removed = SubscriberRepo::delete(&state.pool, city_id, &email).await?;
    if removed {
        state.event_bus.publish(SubscriberRemoved { email, city_id });
    }
    Ok(removed)
}
