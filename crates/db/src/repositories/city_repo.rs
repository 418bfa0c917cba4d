//! Repository for the `cities` table.

use chrono::Utc;
use civic_core::types::{new_id, EntityId};

use crate::models::city::City;
use crate::{DbError, DbPool};

/// Provides CRUD operations for cities.
pub struct CityRepo;

impl CityRepo {
    /// Insert a city. Slugs are unique (`uq_cities_slug`).
    pub async fn create(
        pool: &DbPool,
        name: &str,
        slug: &str,
        created_by: EntityId,
    ) -> Result<City, DbError> {
        let mut tables = pool.write().await;

        if tables.cities.values().any(|c| c.slug == slug) {
            return Err(DbError::UniqueViolation {
                constraint: "uq_cities_slug",
            });
        }

        let city = City {
            id: new_id(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_by,
            created_at: Utc::now(),
        };
        tables.cities.insert(city.id, city.clone());
        Ok(city)
    }

    pub async fn find_by_id(pool: &DbPool, id: EntityId) -> Result<Option<City>, DbError> {
        Ok(pool.read().await.cities.get(&id).cloned())
    }

    pub async fn find_by_slug(pool: &DbPool, slug: &str) -> Result<Option<City>, DbError> {
        Ok(pool
            .read()
            .await
            .cities
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }

    /// List all cities ordered by name.
    pub async fn list(pool: &DbPool) -> Result<Vec<City>, DbError> {
        let mut cities: Vec<City> = pool.read().await.cities.values().cloned().collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }
}
