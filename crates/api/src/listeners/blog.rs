//! Reactions to blog posts going live.

use civic_events::{EventRegistry, PostPublished};

pub fn register_blog_listeners(registry: &mut EventRegistry) {
    registry.subscribe("blog.published", |event: PostPublished| async move {
        tracing::info!(
            post_id = %event.post_id,
            city_id = %event.city_id,
            title = %event.title,
            "Blog post published"
        );
        Ok(())
    });
}
