//! Blog post drafting, publishing and curation.

use civic_core::error::CoreError;
use civic_core::identity::Actor;
use civic_core::roles::CityRole;
use civic_core::types::EntityId;
use civic_core::validation::{validate_body, validate_title};
use civic_db::models::post::{CreatePost, Post};
use civic_db::repositories::PostRepo;
use civic_events::PostPublished;

use crate::actions::{require_city, require_city_role};
use crate::error::AppResult;
use crate::state::AppState;

async fn require_post(state: &AppState, post_id: EntityId) -> AppResult<Post> {
    PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Post", post_id).into())
}

/// Create a draft post. Organizers and admins only.
pub async fn create_post(
    state: &AppState,
    actor: &Actor,
    city_id: EntityId,
    input: &CreatePost,
) -> AppResult<Post> {
    require_city(state, city_id).await?;
    require_city_role(state, actor, city_id, CityRole::can_manage_content, "write posts").await?;
    validate_title(&input.title)?;
    validate_body(&input.body_md)?;

    let post = PostRepo::create(&state.pool, city_id, actor.user_id, input).await?;
    tracing::debug!(post_id = %post.id, %city_id, "Draft post created");
    Ok(post)
}

/// Publish a draft. Organizers and admins only.
///
/// `post:published` fires only on the draft-to-published transition;
/// publishing an already published post returns it unchanged.
pub async fn publish_post(state: &AppState, actor: &Actor, post_id: EntityId) -> AppResult<Post> {
    let post = require_post(state, post_id).await?;
    require_city_role(state, actor, post.city_id, CityRole::can_manage_content, "publish posts")
        .await?;

    let (post, transitioned) = PostRepo::publish(&state.pool, post_id).await?;
    if transitioned {
        tracing::info!(post_id = %post.id, city_id = %post.city_id, "Post published");
        state.event_bus.publish(PostPublished {
            post_id: post.id,
            title: post.title.clone(),
            city_id: post.city_id,
        });
    }

    Ok(post)
}

/// Flip a post's featured flag. City admins only.
pub async fn toggle_featured(state: &AppState, actor: &Actor, post_id: EntityId) -> AppResult<Post> {
    let post = require_post(state, post_id).await?;
    require_city_role(state, actor, post.city_id, CityRole::can_curate, "feature posts").await?;

    let post = PostRepo::toggle_featured(&state.pool, post_id).await?;
    tracing::debug!(post_id = %post.id, is_featured = post.is_featured, "Post featured flag toggled");
    Ok(post)
}
