/// Todo and category primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User ids are opaque UUIDs; they travel as strings on the wire.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
