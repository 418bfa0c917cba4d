//! Mutating operations behind authorization checks.
//!
//! Every action follows the same shape: authorize the [`Actor`], validate
//! input, write to the store, and only then publish the matching event.
//! A failed write publishes nothing; a failing listener never fails the
//! action.
//!
//! [`Actor`]: civic_core::identity::Actor

pub mod cities;
pub mod events;
pub mod newsletter;
pub mod posts;
pub mod profiles;

use civic_core::error::CoreError;
use civic_core::identity::Actor;
use civic_core::roles::CityRole;
use civic_core::types::EntityId;
use civic_db::models::city::City;
use civic_db::repositories::{CityRepo, MembershipRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Load a city or fail with `NotFound`.
pub(crate) async fn require_city(state: &AppState, city_id: EntityId) -> AppResult<City> {
    CityRepo::find_by_id(&state.pool, city_id)
        .await?
        .ok_or_else(|| CoreError::not_found("City", city_id).into())
}

/// Resolve the actor's role in a city and check it with `allowed`.
///
/// Non-members are rejected like members lacking the privilege.
pub(crate) async fn require_city_role(
    state: &AppState,
    actor: &Actor,
    city_id: EntityId,
    allowed: fn(CityRole) -> bool,
    action: &str,
) -> AppResult<CityRole> {
    let role = MembershipRepo::find(&state.pool, actor.user_id, city_id)
        .await?
        .map(|m| m.role);

    match role {
        Some(role) if allowed(role) => Ok(role),
        _ => {
            tracing::debug!(user_id = %actor.user_id, %city_id, action, "Permission denied");
            Err(CoreError::Forbidden(format!("Not allowed to {action} in this city")).into())
        }
    }
}
