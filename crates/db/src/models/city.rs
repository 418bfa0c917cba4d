//! City (tenant) models.

use civic_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `cities` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    pub created_by: EntityId,
    pub created_at: Timestamp,
}

/// DTO for provisioning a city.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCity {
    pub name: String,
    /// Generated from `name` if `None`.
    pub slug: Option<String>,
}
