//! Store Error - Persistence failure classification
//!
//! Repositories report failures as [`StoreError`] so that services can
//! translate them per call site by matching variants.

use std::error::Error;

use thiserror::Error;

/// Store operation result
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure reported by a repository implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("unique constraint violation")]
    UniqueViolation,

    /// A foreign key constraint rejected the write
    #[error("foreign key constraint violation")]
    ForeignKeyViolation,

    /// Any other backend failure (connection, protocol, cancellation, ...)
    #[error("database error: {0}")]
    Database(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl StoreError {
    /// Wrap an arbitrary backend error
    pub fn database<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        StoreError::Database(Box::new(err))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                Some("23505") => return StoreError::UniqueViolation,
                Some("23503") => return StoreError::ForeignKeyViolation,
                _ => {}
            }
        }
        StoreError::database(err)
    }
}
