use std::time::Duration;

use sqlx::error::ErrorKind;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by a catalog store.
///
/// `Unavailable` and `Timeout` are transient: the caller may retry the same
/// call. They are never folded into an empty result.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store call exceeded its {0:?} budget")]
    Timeout(Duration),

    #[error("integrity constraint violated: {0}")]
    Conflict(String),

    #[error("store error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            sqlx::Error::Database(ref db) => {
                let code = db.code().map(|c| c.into_owned()).unwrap_or_default();
                match db.kind() {
                    ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation => StoreError::Conflict(db.message().to_string()),
                    // 08xxx: connection exception, 57014: query_canceled, 57P0x: shutdown
                    _ if code.starts_with("08") || code == "57014" || code.starts_with("57P") => {
                        StoreError::Unavailable(db.message().to_string())
                    }
                    _ => StoreError::Backend(err.to_string()),
                }
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}
