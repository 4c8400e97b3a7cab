use crate::domain::user::UserSummary;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomisationItem {
    pub name: String,
    pub weight: String,
    #[serde(default)]
    pub exclude: bool,
}

/// A user's request to adjust the contents of their meal on a date
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealCustomisation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub items: Json<Vec<CustomisationItem>>,
    pub created_at: DateTime<Utc>,
}

/// Body of PUT /api/customisations. `userId` defaults to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomisationRequest {
    pub user_id: Option<Uuid>,
    pub date: NaiveDate,
    pub items: Vec<CustomisationItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomisationListing {
    #[serde(flatten)]
    pub customisation: MealCustomisation,
    pub user: Option<UserSummary>,
}
