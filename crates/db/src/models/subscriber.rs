//! Newsletter subscriber rows.

use civic_core::types::{EntityId, Timestamp};
use serde::Serialize;

/// A row from the `subscribers` table. Unique per `(city_id, email)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscriber {
    pub id: EntityId,
    pub city_id: EntityId,
    /// Stored normalized (trimmed, lowercase).
    pub email: String,
    pub subscribed_at: Timestamp,
}
