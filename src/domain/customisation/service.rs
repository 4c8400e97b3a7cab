use super::error::CustomisationError;
use super::{
    CustomisationListing, CustomisationRepository, CustomisationRequest, MealCustomisation,
};
use crate::domain::activity::ActivityService;
use crate::domain::shared::{Clock, ReferenceTime};
use crate::domain::user::{UserDirectory, UserSummary};
use chrono::NaiveDate;
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

pub struct CustomisationService {
    customisation_repo: Arc<dyn CustomisationRepository>,
    users: Arc<dyn UserDirectory>,
    activities: Arc<ActivityService>,
    clock: Arc<dyn Clock>,
    reference: ReferenceTime,
}

impl CustomisationService {
    pub fn new(
        customisation_repo: Arc<dyn CustomisationRepository>,
        users: Arc<dyn UserDirectory>,
        activities: Arc<ActivityService>,
        clock: Arc<dyn Clock>,
        reference: ReferenceTime,
    ) -> Self {
        Self {
            customisation_repo,
            users,
            activities,
            clock,
            reference,
        }
    }

    pub async fn request_customisation(
        &self,
        user_id: Uuid,
        request: CustomisationRequest,
    ) -> Result<MealCustomisation, CustomisationError> {
        if request.items.is_empty() {
            return Err(CustomisationError::Validation(
                "At least one item is required".to_string(),
            ));
        }
        if request.items.iter().any(|item| item.name.trim().is_empty()) {
            return Err(CustomisationError::Validation(
                "Item names cannot be empty".to_string(),
            ));
        }

        let now = self.clock.now();
        if request.date < self.reference.today(now) {
            return Err(CustomisationError::PastDate(request.date));
        }

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(CustomisationError::UnknownUser(user_id))?;

        let customisation = MealCustomisation {
            id: Uuid::new_v4(),
            user_id,
            date: request.date,
            items: Json(request.items),
            created_at: now,
        };
        self.customisation_repo.insert(&customisation).await?;

        tracing::info!(
            user_id = %user_id,
            date = %customisation.date,
            items = customisation.items.0.len(),
            "Meal customisation requested"
        );

        self.activities
            .record(
                user_id,
                format!("Requested meal customisation for {}", customisation.date),
            )
            .await;

        Ok(customisation)
    }

    /// Requests for `date` with the requester's contact details attached
    pub async fn list_customisations(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<CustomisationListing>, CustomisationError> {
        let customisations = self.customisation_repo.find_by_date(date).await?;

        let mut user_ids: Vec<Uuid> = customisations.iter().map(|c| c.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users = self.users.find_many(&user_ids).await?;

        Ok(customisations
            .into_iter()
            .map(|customisation| CustomisationListing {
                user: users.get(&customisation.user_id).map(UserSummary::from),
                customisation,
            })
            .collect())
    }
}
