//! The authenticated caller of a mutating operation.
//!
//! Sessions are issued and verified by the external identity provider; by
//! the time an [`Actor`] exists the identity has already been checked.

use crate::error::CoreError;
use crate::types::EntityId;

/// A verified identity acting on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Identity-provider subject, reused as the profile primary key.
    pub user_id: EntityId,
    /// Verified email address reported by the provider.
    pub email: String,
    /// Platform operators may provision new cities.
    pub is_platform_admin: bool,
}

impl Actor {
    pub fn new(user_id: EntityId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            is_platform_admin: false,
        }
    }

    /// Mark this actor as a platform operator.
    pub fn with_platform_admin(mut self) -> Self {
        self.is_platform_admin = true;
        self
    }

    pub fn require_platform_admin(&self) -> Result<(), CoreError> {
        if !self.is_platform_admin {
            return Err(CoreError::Forbidden(
                "Platform admin privileges required".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::types::new_id;

    #[test]
    fn regular_actor_is_not_platform_admin() {
        let actor = Actor::new(new_id(), "a@example.org");
        assert_matches!(actor.require_platform_admin(), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn platform_admin_passes_check() {
        let actor = Actor::new(new_id(), "ops@example.org").with_platform_admin();
        assert!(actor.require_platform_admin().is_ok());
    }
}
