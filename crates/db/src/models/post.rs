//! Blog post models.

use civic_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// Publication state of a blog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Published,
}

/// A row from the `posts` table, scoped to one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: EntityId,
    pub city_id: EntityId,
    pub author_id: EntityId,
    pub title: String,
    pub body_md: String,
    pub status: PostStatus,
    pub is_featured: bool,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a draft post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub body_md: String,
}
