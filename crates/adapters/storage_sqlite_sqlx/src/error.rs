//! Storage-specific error type wrapping sqlx errors.

use dosehub_domain::error::{ConflictError, DoseHubError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for DoseHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Map an insert failure, turning unique-constraint violations into
/// [`DoseHubError::Conflict`].
pub(crate) fn insert_error(err: sqlx::Error, entity: &'static str, key: String) -> DoseHubError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return ConflictError { entity, key }.into();
    }
    StorageError::from(err).into()
}
