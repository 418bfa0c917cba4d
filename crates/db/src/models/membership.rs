//! User-to-city membership rows.

use civic_core::roles::CityRole;
use civic_core::types::{EntityId, Timestamp};
use serde::Serialize;

/// A row from the `memberships` table. Unique per `(user_id, city_id)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Membership {
    pub user_id: EntityId,
    pub city_id: EntityId,
    pub role: CityRole,
    pub joined_at: Timestamp,
}
