//! Community event scheduling.

use civic_core::identity::Actor;
use civic_core::roles::CityRole;
use civic_core::types::EntityId;
use civic_core::validation::{validate_schedule, validate_title};
use civic_db::models::city_event::{CityEvent, CreateCityEvent};
use civic_db::repositories::CityEventRepo;
use civic_events::EventCreated;

use crate::actions::{require_city, require_city_role};
use crate::error::AppResult;
use crate::state::AppState;

/// Create a community event in a city. Organizers and admins only.
pub async fn create_event(
    state: &AppState,
    actor: &Actor,
    city_id: EntityId,
    input: &CreateCityEvent,
) -> AppResult<CityEvent> {
    require_city(state, city_id).await?;
    require_city_role(state, actor, city_id, CityRole::can_manage_content, "create events").await?;
    validate_title(&input.title)?;
    validate_schedule(input.starts_at, input.ends_at)?;

    let event = CityEventRepo::create(&state.pool, city_id, actor.user_id, input).await?;

    tracing::info!(event_id = %event.id, %city_id, "Community event created");
    state.event_bus.publish(EventCreated {
        event_id: event.id,
        city_id,
    });

    Ok(event)
}
