use crate::error::AppError;
use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CustomisationError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("cannot customise meals for a past date ({0})")]
    PastDate(NaiveDate),
    #[error("user {0} not found")]
    UnknownUser(Uuid),
}

impl From<AppError> for CustomisationError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => CustomisationError::Validation(msg),
            _ => CustomisationError::Storage(err.to_string()),
        }
    }
}

impl From<CustomisationError> for AppError {
    fn from(err: CustomisationError) -> Self {
        match err {
            CustomisationError::Storage(msg) => AppError::Internal(msg),
            CustomisationError::Validation(msg) => AppError::BadRequest(msg),
            CustomisationError::PastDate(_) => AppError::BadRequest(err.to_string()),
            CustomisationError::UnknownUser(id) => {
                AppError::NotFound(format!("User {} not found", id))
            }
        }
    }
}
