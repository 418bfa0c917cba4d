//! City provisioning and membership.

use civic_core::identity::Actor;
use civic_core::roles::CityRole;
use civic_core::types::EntityId;
use civic_core::validation::{generate_slug, validate_city_name, validate_slug};
use civic_db::models::city::{City, CreateCity};
use civic_db::models::membership::Membership;
use civic_db::repositories::{CityRepo, MembershipRepo};
use civic_db::DbError;
use civic_events::{CityCreated, UserJoinedCity};

use crate::actions::{require_city, require_city_role};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Provision a new city. Platform admins only.
///
/// The creator becomes the city's first admin. Publishes `city:created`
/// followed by `user:joined_city` for the creator.
pub async fn create_city(state: &AppState, actor: &Actor, input: &CreateCity) -> AppResult<City> {
    actor.require_platform_admin()?;
    validate_city_name(&input.name)?;

    let slug = match &input.slug {
        Some(slug) => slug.clone(),
        None => generate_slug(&input.name),
    };
    validate_slug(&slug)?;

    let city = CityRepo::create(&state.pool, input.name.trim(), &slug, actor.user_id).await?;
    let membership =
        MembershipRepo::create_if_absent(&state.pool, actor.user_id, city.id, CityRole::Admin)
            .await?;

    tracing::info!(city_id = %city.id, slug = %city.slug, "City created");
    state.event_bus.publish(CityCreated {
        city_id: city.id,
        slug: city.slug.clone(),
    });
    if membership.is_some() {
        state.event_bus.publish(UserJoinedCity {
            user_id: actor.user_id,
            city_id: city.id,
        });
    }

    Ok(city)
}

/// Join a city as a member.
///
/// Joining a city twice returns the existing membership unchanged and
/// publishes nothing.
pub async fn join_city(state: &AppState, actor: &Actor, city_id: EntityId) -> AppResult<Membership> {
    require_city(state, city_id).await?;

    match MembershipRepo::create_if_absent(&state.pool, actor.user_id, city_id, CityRole::Member)
        .await?
    {
        Some(membership) => {
            state.event_bus.publish(UserJoinedCity {
                user_id: actor.user_id,
                city_id,
            });
            Ok(membership)
        }
        None => MembershipRepo::find(&state.pool, actor.user_id, city_id)
            .await?
            .ok_or(AppError::Database(DbError::RowNotFound {
                table: "memberships",
            })),
    }
}

/// Change a member's role. City admins only.
pub async fn set_member_role(
    state: &AppState,
    actor: &Actor,
    city_id: EntityId,
    user_id: EntityId,
    role: CityRole,
) -> AppResult<Membership> {
    require_city_role(state, actor, city_id, CityRole::can_curate, "manage members").await?;
    let membership = MembershipRepo::set_role(&state.pool, user_id, city_id, role).await?;
    tracing::info!(%user_id, %city_id, role = %role, "Member role changed");
    Ok(membership)
}
