pub mod error;
pub mod model;
pub mod service;

pub use error::CustomisationError;
pub use model::{CustomisationItem, CustomisationListing, CustomisationRequest, MealCustomisation};
pub use service::CustomisationService;

use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait CustomisationRepository: Send + Sync {
    async fn insert(&self, customisation: &MealCustomisation) -> AppResult<()>;

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<MealCustomisation>>;
}
