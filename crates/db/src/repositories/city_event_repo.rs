//! Repository for the `events` table (community events, not bus events).

use chrono::Utc;
use civic_core::types::{new_id, EntityId};

use crate::models::city_event::{CityEvent, CreateCityEvent};
use crate::{DbError, DbPool};

/// Provides CRUD operations for community events.
pub struct CityEventRepo;

impl CityEventRepo {
    pub async fn create(
        pool: &DbPool,
        city_id: EntityId,
        created_by: EntityId,
        input: &CreateCityEvent,
    ) -> Result<CityEvent, DbError> {
        let event = CityEvent {
            id: new_id(),
            city_id,
            title: input.title.clone(),
            description: input.description.clone(),
            location: input.location.clone(),
            starts_at: input.starts_at,
            ends_at: input.ends_at,
            created_by,
            created_at: Utc::now(),
        };
        pool.write().await.events.insert(event.id, event.clone());
        Ok(event)
    }

    pub async fn find_by_id(pool: &DbPool, id: EntityId) -> Result<Option<CityEvent>, DbError> {
        Ok(pool.read().await.events.get(&id).cloned())
    }

    /// List a city's events ordered by start time.
    pub async fn list_for_city(
        pool: &DbPool,
        city_id: EntityId,
    ) -> Result<Vec<CityEvent>, DbError> {
        let mut events: Vec<CityEvent> = pool
            .read()
            .await
            .events
            .values()
            .filter(|e| e.city_id == city_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.starts_at);
        Ok(events)
    }
}
