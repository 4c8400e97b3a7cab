use crate::domain::shared::MealType;
use crate::error::AppError;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CancellationError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("cannot cancel meals starting in the past ({0})")]
    PastDate(NaiveDate),
    #[error("cancellation cutoff passed for {}", describe_windows(.0))]
    CutoffPassed(Vec<(MealType, NaiveTime)>),
    #[error("an identical cancellation already exists")]
    Duplicate,
    #[error("user {0} not found")]
    UnknownUser(Uuid),
}

fn describe_windows(windows: &[(MealType, NaiveTime)]) -> String {
    windows
        .iter()
        .map(|(meal, cutoff)| format!("{} ({})", meal, cutoff.format("%H:%M")))
        .collect::<Vec<_>>()
        .join(" and ")
}

impl From<AppError> for CancellationError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Conflict(_) => CancellationError::Duplicate,
            _ => CancellationError::Storage(err.to_string()),
        }
    }
}

impl From<CancellationError> for AppError {
    fn from(err: CancellationError) -> Self {
        match err {
            CancellationError::Storage(msg) => AppError::Internal(msg),
            CancellationError::UnknownUser(id) => {
                AppError::NotFound(format!("User {} not found", id))
            }
            CancellationError::Duplicate => AppError::Conflict(err.to_string()),
            CancellationError::InvalidRange { .. }
            | CancellationError::PastDate(_)
            | CancellationError::CutoffPassed(_) => AppError::BadRequest(err.to_string()),
        }
    }
}
