/// Primary key type shared by every persisted entity.
pub type DbId = i64;

/// All timestamps are stored and compared in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
