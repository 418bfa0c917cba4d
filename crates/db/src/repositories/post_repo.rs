//! Repository for the `posts` table.

use chrono::Utc;
use civic_core::types::{new_id, EntityId};

use crate::models::post::{CreatePost, Post, PostStatus};
use crate::{DbError, DbPool};

/// Provides CRUD operations for blog posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new draft post.
    pub async fn create(
        pool: &DbPool,
        city_id: EntityId,
        author_id: EntityId,
        input: &CreatePost,
    ) -> Result<Post, DbError> {
        let now = Utc::now();
        let post = Post {
            id: new_id(),
            city_id,
            author_id,
            title: input.title.clone(),
            body_md: input.body_md.clone(),
            status: PostStatus::Draft,
            is_featured: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        pool.write().await.posts.insert(post.id, post.clone());
        Ok(post)
    }

    pub async fn find_by_id(pool: &DbPool, id: EntityId) -> Result<Option<Post>, DbError> {
        Ok(pool.read().await.posts.get(&id).cloned())
    }

    /// Move a post to `Published`.
    ///
    /// Returns the post and whether this call performed the transition.
    /// Publishing an already published post is a no-op returning `false`.
    pub async fn publish(pool: &DbPool, id: EntityId) -> Result<(Post, bool), DbError> {
        let mut tables = pool.write().await;
        let post = tables
            .posts
            .get_mut(&id)
            .ok_or(DbError::RowNotFound { table: "posts" })?;

        if post.status == PostStatus::Published {
            return Ok((post.clone(), false));
        }

        let now = Utc::now();
        post.status = PostStatus::Published;
        post.published_at = Some(now);
        post.updated_at = now;
        Ok((post.clone(), true))
    }

    /// Flip the `is_featured` flag and return the updated post.
    pub async fn toggle_featured(pool: &DbPool, id: EntityId) -> Result<Post, DbError> {
        let mut tables = pool.write().await;
        let post = tables
            .posts
            .get_mut(&id)
            .ok_or(DbError::RowNotFound { table: "posts" })?;
        post.is_featured = !post.is_featured;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    /// List a city's published posts, newest first.
    pub async fn list_published(pool: &DbPool, city_id: EntityId) -> Result<Vec<Post>, DbError> {
        let mut posts: Vec<Post> = pool
            .read()
            .await
            .posts
            .values()
            .filter(|p| p.city_id == city_id && p.status == PostStatus::Published)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }
}
