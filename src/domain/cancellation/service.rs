use super::error::CancellationError;
use super::policy::{CancellationWindowPolicy, WindowViolation};
use super::{CancellationListing, CancellationRepository, CancellationRequest, MealCancellation};
use crate::domain::activity::ActivityService;
use crate::domain::shared::{Clock, MealSelection};
use crate::domain::user::UserDirectory;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

pub struct CancellationService {
    cancellation_repo: Arc<dyn CancellationRepository>,
    users: Arc<dyn UserDirectory>,
    activities: Arc<ActivityService>,
    clock: Arc<dyn Clock>,
    policy: CancellationWindowPolicy,
}

impl CancellationService {
    pub fn new(
        cancellation_repo: Arc<dyn CancellationRepository>,
        users: Arc<dyn UserDirectory>,
        activities: Arc<ActivityService>,
        clock: Arc<dyn Clock>,
        policy: CancellationWindowPolicy,
    ) -> Self {
        Self {
            cancellation_repo,
            users,
            activities,
            clock,
            policy,
        }
    }
}

#[async_trait]
pub trait CancellationServiceApi: Send + Sync {
    /// Files a cancellation for `user_id`. The ledger is untouched here;
    /// the debit engine honours the record when it runs.
    async fn request_cancellation(
        &self,
        user_id: Uuid,
        request: CancellationRequest,
    ) -> Result<MealCancellation, CancellationError>;

    async fn list_cancellations(
        &self,
        active_on: Option<NaiveDate>,
    ) -> Result<Vec<CancellationListing>, CancellationError>;
}

#[async_trait]
impl CancellationServiceApi for CancellationService {
    async fn request_cancellation(
        &self,
        user_id: Uuid,
        request: CancellationRequest,
    ) -> Result<MealCancellation, CancellationError> {
        let now = self.clock.now();

        self.policy
            .evaluate(request.start_date, request.end_date, request.meal_type, now)
            .map_err(|violation| self.to_error(violation, &request))?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(CancellationError::UnknownUser(user_id))?;

        if self
            .cancellation_repo
            .exists(user_id, request.start_date, request.end_date, request.meal_type)
            .await?
        {
            return Err(CancellationError::Duplicate);
        }

        let cancellation = MealCancellation {
            id: Uuid::new_v4(),
            user_id,
            start_date: request.start_date,
            end_date: request.end_date,
            meal_type: request.meal_type,
            created_at: now,
        };
        self.cancellation_repo.insert(&cancellation).await?;

        tracing::info!(
            user_id = %user_id,
            start_date = %cancellation.start_date,
            end_date = %cancellation.end_date,
            meal_type = %cancellation.meal_type,
            "Meal cancellation filed"
        );

        self.activities
            .record(
                user_id,
                format!(
                    "Cancelled {} from {} to {}",
                    describe_selection(&cancellation),
                    cancellation.start_date,
                    cancellation.end_date
                ),
            )
            .await;

        Ok(cancellation)
    }

    async fn list_cancellations(
        &self,
        active_on: Option<NaiveDate>,
    ) -> Result<Vec<CancellationListing>, CancellationError> {
        let cancellations = self.cancellation_repo.list(active_on).await?;

        let mut user_ids: Vec<Uuid> = cancellations.iter().map(|c| c.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users = self.users.find_many(&user_ids).await?;

        Ok(cancellations
            .into_iter()
            .map(|cancellation| CancellationListing {
                name: users.get(&cancellation.user_id).map(|u| u.full_name()),
                cancellation,
            })
            .collect())
    }
}

impl CancellationService {
    fn to_error(&self, violation: WindowViolation, request: &CancellationRequest) -> CancellationError {
        match violation {
            WindowViolation::InvalidRange => CancellationError::InvalidRange {
                start: request.start_date,
                end: request.end_date,
            },
            WindowViolation::PastDate => CancellationError::PastDate(request.start_date),
            WindowViolation::CutoffPassed(meals) => CancellationError::CutoffPassed(
                meals
                    .into_iter()
                    .map(|meal| (meal, self.policy.reference().cutoff(meal)))
                    .collect(),
            ),
        }
    }
}

fn describe_selection(cancellation: &MealCancellation) -> &'static str {
    match cancellation.meal_type {
        MealSelection::Lunch => "lunch",
        MealSelection::Dinner => "dinner",
        MealSelection::Both => "lunch and dinner",
    }
}
