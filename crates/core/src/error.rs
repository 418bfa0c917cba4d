use crate::types::EntityId;

/// Domain-level failure shared by every civic crate.
///
/// Messages are safe to show to the acting user; store and listener
/// failures are carried by their own error types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// No verified identity was supplied.
    #[error("Sign-in required: {0}")]
    Unauthorized(String),

    /// The actor is known but lacks the role for this city.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: EntityId) -> Self {
        Self::NotFound { entity, id }
    }
}
