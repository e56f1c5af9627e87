//! Quotes service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// A quote could not be saved. Nothing was written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A quote with the generated quote number already exists.
    #[error("quote already exists")]
    AlreadyExists,

    /// Client name or items were missing.
    #[error("missing required data")]
    MissingRequiredData,

    /// Provided data failed validation.
    #[error("invalid data")]
    InvalidData,

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PersistenceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// A lookup failed in the storage layer. Distinct from a lookup that found nothing.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A stored row could not be decoded into a quote.
    #[error("failed to decode stored quote column `{column}`")]
    Decode {
        /// Column that failed to decode
        column: String,

        /// Decoding failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StorageError {
    fn from(error: Error) -> Self {
        match error {
            Error::ColumnDecode { index, source } => Self::Decode {
                column: index,
                source,
            },
            other => Self::Sql(other),
        }
    }
}
