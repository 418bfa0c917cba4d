//! Reactions to new users.

use async_trait::async_trait;
use civic_events::{EventHandler, EventRegistry, HandlerResult, UserCreated};

/// Greets newly created users.
///
/// Logs for now; the welcome email will be sent from here.
pub struct WelcomeListener;

#[async_trait]
impl EventHandler<UserCreated> for WelcomeListener {
    async fn handle(&self, event: UserCreated) -> HandlerResult {
        tracing::info!(user_id = %event.user_id, email = %event.email, "New user registered");
        Ok(())
    }
}

pub fn register_user_listeners(registry: &mut EventRegistry) {
    registry.subscribe_handler("users.welcome", WelcomeListener);
}
