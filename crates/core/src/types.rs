/// Surrogate primary keys (tests, answer events, results) are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User identifiers are opaque strings issued by the identity provider.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
