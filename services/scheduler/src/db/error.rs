//! Database error types.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to connect to the database.
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Failed to execute a query.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),

    /// Migration directory not found in the current environment.
    #[error("migration directory not found; tried {tried}. Last error: {last_error}. Run from repo root or services/scheduler.")]
    MigrationDirNotFound { tried: String, last_error: String },

    /// A publish transaction kept losing to concurrent writers and gave up
    /// after the bounded retries. Safe to retry from the caller's side.
    #[error("schedule publish aborted by contention after {attempts} attempts")]
    Contention { attempts: u32 },
}

impl DbError {
    /// Returns true if retrying the failed operation can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DbError::Contention { .. })
    }
}
