//! Error types for Forkful storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
///
/// Validation of inputs (non-empty titles, well-formed fields) happens at the
/// boundary before storage is reached; this taxonomy covers only the
/// invariants the storage layer itself enforces.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record, e.g. `"user"`.
        entity: &'static str,
        /// The id that was not found.
        id: i64,
    },

    /// Username uniqueness violation on create.
    #[error("username already taken: {username}")]
    UsernameTaken {
        /// The username that already exists.
        username: String,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(err.to_string())
    }
}
