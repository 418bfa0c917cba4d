/// All entity primary keys are time-ordered UUIDs (v7).
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh primary key.
pub fn new_id() -> EntityId {
    uuid::Uuid::now_v7()
}
