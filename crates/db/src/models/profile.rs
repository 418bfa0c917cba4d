//! User profile models.

use civic_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `profiles` table.
///
/// The primary key is the identity-provider subject of the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: EntityId,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub display_name: Option<String>,
}
