//! Shared primitive type aliases.

/// Internal database identifier (bigserial).
pub type DbId = i64;

/// UTC timestamp as stored in the database.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
