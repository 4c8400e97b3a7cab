use crate::domain::shared::{MealSelection, MealType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's request to skip meals over an inclusive date range
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealCancellation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub meal_type: MealSelection,
    pub created_at: DateTime<Utc>,
}

impl MealCancellation {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn covers(&self, date: NaiveDate, meal: MealType) -> bool {
        self.contains(date) && self.meal_type.covers(meal)
    }
}

/// Body of POST /api/cancellations. `userId` defaults to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRequest {
    pub user_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub meal_type: MealSelection,
}

/// Cancellation row enriched with the owner's name for admin screens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CancellationListing {
    #[serde(flatten)]
    pub cancellation: MealCancellation,
    pub name: Option<String>,
}
