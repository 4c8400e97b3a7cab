use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::holiday::{Holiday, HolidayCalendar};
use crate::error::AppResult;

/// GET /api/holidays
pub async fn list_holidays(
    State(calendar): State<Arc<HolidayCalendar>>,
) -> AppResult<Json<Vec<Holiday>>> {
    let holidays = calendar.list().await?;
    Ok(Json(holidays))
}
