use civic_core::error::CoreError;
use civic_db::DbError;

/// Application-level error type for actions.
///
/// Wraps [`CoreError`] for domain errors and [`DbError`] for store errors.
/// [`AppError::code`] gives the stable error code the presentation layer
/// maps to its own responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `civic_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store error from `civic_db`.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Convenience type alias for action return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Stable, machine-readable error code.
    ///
    /// - Missing rows map to `NOT_FOUND`.
    /// - Unique constraint violations map to `CONFLICT`.
    /// - Internal errors are logged here and map to `INTERNAL_ERROR`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => "NOT_FOUND",
                CoreError::Validation(_) => "VALIDATION_ERROR",
                CoreError::Conflict(_) => "CONFLICT",
                CoreError::Unauthorized(_) => "UNAUTHORIZED",
                CoreError::Forbidden(_) => "FORBIDDEN",
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    "INTERNAL_ERROR"
                }
            },
            AppError::Database(DbError::RowNotFound { .. }) => "NOT_FOUND",
            AppError::Database(DbError::UniqueViolation { .. }) => "CONFLICT",
        }
    }
}
