use crate::domain::cancellation::{excluded_users, CancellationRepository};
use crate::domain::ledger::{LedgerRepository, Plan};
use crate::domain::shared::MealType;
use crate::domain::user::{UserDirectory, UserRole};
use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid input: {0}")]
    Validation(String),
}

impl From<AppError> for RosterError {
    fn from(err: AppError) -> Self {
        RosterError::Storage(err.to_string())
    }
}

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::Storage(msg) => AppError::Internal(msg),
            RosterError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

/// One delivery line: who gets the meal and where it goes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub postal_address: Option<String>,
    pub plan: Plan,
    pub meal: MealType,
    pub meal_type: Option<String>,
    pub carb_type: Option<String>,
    pub remaining_meals: i32,
}

/// Answers "who receives `meal` on `date`"
pub struct RosterBuilder {
    ledger_repo: Arc<dyn LedgerRepository>,
    cancellation_repo: Arc<dyn CancellationRepository>,
    users: Arc<dyn UserDirectory>,
}

impl RosterBuilder {
    pub fn new(
        ledger_repo: Arc<dyn LedgerRepository>,
        cancellation_repo: Arc<dyn CancellationRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            ledger_repo,
            cancellation_repo,
            users,
        }
    }

    /// `meal_type` must be exactly `lunch` or `dinner`
    pub async fn build_roster(
        &self,
        date: NaiveDate,
        meal_type: &str,
    ) -> Result<Vec<RosterEntry>, RosterError> {
        let meal: MealType = meal_type.parse().map_err(RosterError::Validation)?;

        let excluded = excluded_users(self.cancellation_repo.as_ref(), date, meal).await?;
        let balances: Vec<_> = self
            .ledger_repo
            .find_with_credits(meal)
            .await?
            .into_iter()
            .filter(|b| !excluded.contains(&b.user_id) && b.has_started(date))
            .collect();

        let user_ids: Vec<Uuid> = balances.iter().map(|b| b.user_id).collect();
        let users = self.users.find_many(&user_ids).await?;

        let mut roster: Vec<RosterEntry> = balances
            .into_iter()
            .filter_map(|balance| {
                let user = users.get(&balance.user_id)?;
                if user.role != UserRole::User {
                    return None;
                }
                Some(RosterEntry {
                    user_id: user.id,
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                    email: user.email.clone(),
                    mobile: user.mobile.clone(),
                    postal_address: user.postal_address.clone(),
                    plan: balance.plan,
                    meal,
                    remaining_meals: balance.credits(meal),
                    meal_type: balance.meal_type,
                    carb_type: balance.carb_type,
                })
            })
            .collect();
        roster.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });

        tracing::debug!(
            date = %date,
            meal = %meal,
            excluded = excluded.len(),
            entries = roster.len(),
            "Roster built"
        );

        Ok(roster)
    }
}
