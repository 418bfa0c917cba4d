//! Profile creation for newly verified identities.

use civic_core::identity::Actor;
use civic_core::validation::normalize_email;
use civic_db::models::profile::{CreateProfile, Profile};
use civic_db::repositories::ProfileRepo;
use civic_events::UserCreated;

use crate::error::AppResult;
use crate::state::AppState;

/// Create the actor's profile and publish `user:created`.
///
/// Fails with a conflict if the actor already has a profile.
pub async fn create_profile(
    state: &AppState,
    actor: &Actor,
    input: &CreateProfile,
) -> AppResult<Profile> {
    let email = normalize_email(&actor.email)?;
    let profile = ProfileRepo::create(&state.pool, actor.user_id, &email, input).await?;

    tracing::info!(user_id = %profile.id, "Profile created");
    state.event_bus.publish(UserCreated {
        user_id: profile.id,
        email: profile.email.clone(),
    });

    Ok(profile)
}
