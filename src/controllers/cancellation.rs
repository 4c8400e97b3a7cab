use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::cancellation::{CancellationListing, CancellationRequest, MealCancellation};
use crate::{
    domain::cancellation::{CancellationService, CancellationServiceApi},
    error::AppResult,
    infrastructure::auth::AuthUser,
};

#[derive(Debug, Deserialize)]
pub struct ListCancellationsQuery {
    pub date: Option<NaiveDate>,
}

pub struct CancellationController {
    cancellation_service: Arc<CancellationService>,
}

impl CancellationController {
    pub fn new(cancellation_service: Arc<CancellationService>) -> Self {
        Self {
            cancellation_service,
        }
    }

    /// POST /api/cancellations - Cancel meals over a date range
    pub async fn create_cancellation(
        State(controller): State<Arc<CancellationController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<CancellationRequest>,
    ) -> AppResult<(StatusCode, Json<MealCancellation>)> {
        let user_id = auth_user.resolve_target(request.user_id)?;
        let cancellation = controller
            .cancellation_service
            .request_cancellation(user_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(cancellation)))
    }

    /// GET /api/cancellations?date= - All cancellations, or those active on a date (admin)
    pub async fn list_cancellations(
        State(controller): State<Arc<CancellationController>>,
        Extension(auth_user): Extension<AuthUser>,
        Query(query): Query<ListCancellationsQuery>,
    ) -> AppResult<Json<Vec<CancellationListing>>> {
        auth_user.require_admin()?;
        let listings = controller
            .cancellation_service
            .list_cancellations(query.date)
            .await?;
        Ok(Json(listings))
    }
}
