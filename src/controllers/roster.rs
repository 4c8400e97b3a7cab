use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::roster::{RosterBuilder, RosterEntry};
use crate::{error::AppResult, infrastructure::auth::AuthUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterQuery {
    pub date: NaiveDate,
    pub meal_type: String,
}

pub struct RosterController {
    roster_builder: Arc<RosterBuilder>,
}

impl RosterController {
    pub fn new(roster_builder: Arc<RosterBuilder>) -> Self {
        Self { roster_builder }
    }

    /// GET /api/roster?date=&mealType= - Delivery list (admin)
    pub async fn get_roster(
        State(controller): State<Arc<RosterController>>,
        Extension(auth_user): Extension<AuthUser>,
        Query(query): Query<RosterQuery>,
    ) -> AppResult<Json<Vec<RosterEntry>>> {
        auth_user.require_admin()?;
        let roster = controller
            .roster_builder
            .build_roster(query.date, &query.meal_type)
            .await?;
        Ok(Json(roster))
    }
}
