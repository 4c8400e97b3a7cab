use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<AppError> for EngineError {
    fn from(err: AppError) -> Self {
        EngineError::Storage(err.to_string())
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Storage(msg) => AppError::Internal(msg),
        }
    }
}
