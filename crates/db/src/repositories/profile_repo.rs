//! Repository for the `profiles` table.

use chrono::Utc;
use civic_core::types::EntityId;

use crate::models::profile::{CreateProfile, Profile};
use crate::{DbError, DbPool};

/// Provides CRUD operations for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a profile for an identity-provider user.
    ///
    /// Fails with `uq_profiles_id` if the user already has a profile and
    /// `uq_profiles_email` if another profile owns the email.
    pub async fn create(
        pool: &DbPool,
        user_id: EntityId,
        email: &str,
        input: &CreateProfile,
    ) -> Result<Profile, DbError> {
        let mut tables = pool.write().await;

        if tables.profiles.contains_key(&user_id) {
            return Err(DbError::UniqueViolation {
                constraint: "uq_profiles_id",
            });
        }
        if tables.profiles.values().any(|p| p.email == email) {
            return Err(DbError::UniqueViolation {
                constraint: "uq_profiles_email",
            });
        }

        let profile = Profile {
            id: user_id,
            email: email.to_string(),
            display_name: input.display_name.clone(),
            created_at: Utc::now(),
        };
        tables.profiles.insert(user_id, profile.clone());
        Ok(profile)
    }

    pub async fn find_by_id(pool: &DbPool, id: EntityId) -> Result<Option<Profile>, DbError> {
        Ok(pool.read().await.profiles.get(&id).cloned())
    }
}
