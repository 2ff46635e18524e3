use sea_orm::error::DbErr;
use thiserror::Error;

/// Unified error type for the service layer.
///
/// Mirrors the three failure classes callers care about: validation
/// rejections (bad input, duplicate unique keys), not-found lookups and
/// persistence failures. Nothing here is retried; every error surfaces
/// synchronously to the caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Hash error: {0}")]
    HashError(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<sea_orm::TransactionError<ServiceError>> for ServiceError {
    fn from(err: sea_orm::TransactionError<ServiceError>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
            sea_orm::TransactionError::Transaction(service_err) => service_err,
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Helper to build a database error from anything convertible into `DbErr`.
    pub fn db_error<E: Into<DbErr>>(error: E) -> Self {
        ServiceError::DatabaseError(error.into())
    }

    /// Whether the error should be reported to the caller as a client fault
    /// rather than a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::ValidationError(_)
                | Self::InvalidInput(_)
                | Self::InvalidOperation(_)
                | Self::Conflict(_)
                | Self::InsufficientStock(_)
                | Self::Forbidden(_)
        )
    }
}

/// Convenience alias used across the crate.
pub type AppError = ServiceError;
