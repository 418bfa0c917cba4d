//! Repository for the `subscribers` table.

use chrono::Utc;
use civic_core::types::{new_id, EntityId};

use crate::models::subscriber::Subscriber;
use crate::{DbError, DbPool};

/// Provides CRUD operations for newsletter subscribers.
pub struct SubscriberRepo;

impl SubscriberRepo {
    /// Insert a subscriber unless the email is already subscribed to the city.
    ///
    /// `email` must already be normalized. Returns `None` for an existing
    /// subscription.
    pub async fn create_if_absent(
        pool: &DbPool,
        city_id: EntityId,
        email: &str,
    ) -> Result<Option<Subscriber>, DbError> {
        let mut tables = pool.write().await;
        let key = (city_id, email.to_string());
        if tables.subscribers.contains_key(&key) {
            return Ok(None);
        }

        let subscriber = Subscriber {
            id: new_id(),
            city_id,
            email: email.to_string(),
            subscribed_at: Utc::now(),
        };
        tables.subscribers.insert(key, subscriber.clone());
        Ok(Some(subscriber))
    }

    /// Delete a subscription. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, city_id: EntityId, email: &str) -> Result<bool, DbError> {
        Ok(pool
            .write()
            .await
            .subscribers
            .remove(&(city_id, email.to_string()))
            .is_some())
    }

    pub async fn count_for_city(pool: &DbPool, city_id: EntityId) -> Result<usize, DbError> {
        Ok(pool
            .read()
            .await
            .subscribers
            .keys()
            .filter(|(id, _)| *id == city_id)
            .count())
    }
}
