//! Repository for the `memberships` table.

use chrono::Utc;
use civic_core::roles::CityRole;
use civic_core::types::EntityId;

use crate::models::membership::Membership;
use crate::{DbError, DbPool};

/// Provides CRUD operations for user/city memberships.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Insert a membership unless one already exists for the pair.
    ///
    /// Returns `None` when the user is already a member; the existing role is
    /// left untouched.
    pub async fn create_if_absent(
        pool: &DbPool,
        user_id: EntityId,
        city_id: EntityId,
        role: CityRole,
    ) -> Result<Option<Membership>, DbError> {
        let mut tables = pool.write().await;
        let key = (user_id, city_id);
        if tables.memberships.contains_key(&key) {
            return Ok(None);
        }

        let membership = Membership {
            user_id,
            city_id,
            role,
            joined_at: Utc::now(),
        };
        tables.memberships.insert(key, membership.clone());
        Ok(Some(membership))
    }

    pub async fn find(
        pool: &DbPool,
        user_id: EntityId,
        city_id: EntityId,
    ) -> Result<Option<Membership>, DbError> {
        Ok(pool.read().await.memberships.get(&(user_id, city_id)).cloned())
    }

    /// Change the role of an existing membership.
    pub async fn set_role(
        pool: &DbPool,
        user_id: EntityId,
        city_id: EntityId,
        role: CityRole,
    ) -> Result<Membership, DbError> {
        let mut tables = pool.write().await;
        let membership = tables
            .memberships
            .get_mut(&(user_id, city_id))
            .ok_or(DbError::RowNotFound {
                table: "memberships",
            })?;
        membership.role = role;
        Ok(membership.clone())
    }

    pub async fn list_for_city(
        pool: &DbPool,
        city_id: EntityId,
    ) -> Result<Vec<Membership>, DbError> {
        let mut members: Vec<Membership> = pool
            .read()
            .await
            .memberships
            .values()
            .filter(|m| m.city_id == city_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| m.joined_at);
        Ok(members)
    }
}
