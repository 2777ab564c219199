/// All timestamps are UTC, serialized as ISO-8601.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
