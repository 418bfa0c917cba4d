use std::collections::HashMap;
use std::sync::Arc;

use civic_core::types::EntityId;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::city::City;
use crate::models::city_event::CityEvent;
use crate::models::membership::Membership;
use crate::models::post::Post;
use crate::models::profile::Profile;
use crate::models::subscriber::Subscriber;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A row addressed by primary key does not exist.
    #[error("Row not found in {table}")]
    RowNotFound { table: &'static str },

    /// An insert would violate a unique constraint.
    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: &'static str },
}

/// All tables, keyed the way their unique constraints are defined.
#[derive(Default)]
pub(crate) struct Tables {
    pub profiles: HashMap<EntityId, Profile>,
    pub cities: HashMap<EntityId, City>,
    /// Keyed by `(user_id, city_id)`.
    pub memberships: HashMap<(EntityId, EntityId), Membership>,
    pub events: HashMap<EntityId, CityEvent>,
    pub posts: HashMap<EntityId, Post>,
    /// Keyed by `(city_id, email)`.
    pub subscribers: HashMap<(EntityId, String), Subscriber>,
}

/// Shared handle to the store.
///
/// Cheaply cloneable; all clones see the same tables.
#[derive(Clone, Default)]
pub struct DbPool {
    tables: Arc<RwLock<Tables>>,
}

impl DbPool {
    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}

/// Create an empty store.
pub fn create_pool() -> DbPool {
    tracing::debug!("Creating in-memory store");
    DbPool::default()
}
