use crate::error::AppError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("user {0} not found")]
    UnknownUser(Uuid),
}

impl From<AppError> for LedgerError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => LedgerError::Validation(msg),
            _ => LedgerError::Storage(err.to_string()),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(msg) => AppError::BadRequest(msg),
            LedgerError::UnknownUser(id) => AppError::NotFound(format!("User {} not found", id)),
            LedgerError::Storage(msg) => AppError::Internal(msg),
        }
    }
}
