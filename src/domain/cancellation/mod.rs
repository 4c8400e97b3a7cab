pub mod error;
pub mod model;
pub mod policy;
pub mod service;

pub use error::CancellationError;
pub use model::{CancellationListing, CancellationRequest, MealCancellation};
pub use policy::{CancellationWindowPolicy, WindowViolation};
pub use service::{CancellationService, CancellationServiceApi};

use crate::domain::shared::{MealSelection, MealType};
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

#[async_trait]
pub trait CancellationRepository: Send + Sync {
    /// Fails with `AppError::Conflict` when an identical record exists
    async fn insert(&self, cancellation: &MealCancellation) -> AppResult<()>;

    async fn exists(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        meal_type: MealSelection,
    ) -> AppResult<bool>;

    /// Cancellations covering `date` for `meal`, including `both`
    async fn find_active_on(&self, date: NaiveDate, meal: MealType)
        -> AppResult<Vec<MealCancellation>>;

    /// All cancellations, or only those whose range contains `active_on`
    async fn list(&self, active_on: Option<NaiveDate>) -> AppResult<Vec<MealCancellation>>;
}

/// Users who must not be served (or debited) `meal` on `date`
pub async fn excluded_users(
    repo: &dyn CancellationRepository,
    date: NaiveDate,
    meal: MealType,
) -> AppResult<HashSet<Uuid>> {
    let active = repo.find_active_on(date, meal).await?;
    Ok(active.into_iter().map(|c| c.user_id).collect())
}
