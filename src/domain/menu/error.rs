use crate::error::AppError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("menu {0} not found")]
    MenuNotFound(Uuid),
    #[error("item {item_id} is not on menu {menu_id}")]
    ItemNotFound { menu_id: Uuid, item_id: Uuid },
}

impl From<AppError> for MenuError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => MenuError::Validation(msg),
            _ => MenuError::Storage(err.to_string()),
        }
    }
}

impl From<MenuError> for AppError {
    fn from(err: MenuError) -> Self {
        match err {
            MenuError::Storage(msg) => AppError::Internal(msg),
            MenuError::Validation(msg) => AppError::BadRequest(msg),
            MenuError::MenuNotFound(_) | MenuError::ItemNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
        }
    }
}
