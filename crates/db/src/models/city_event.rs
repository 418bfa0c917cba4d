//! Community event (meetup, workshop, ...) models.

use civic_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `events` table, scoped to one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityEvent {
    pub id: EntityId,
    pub city_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub created_by: EntityId,
    pub created_at: Timestamp,
}

/// DTO for creating a community event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCityEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
}
