use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::customisation::{
    CustomisationListing, CustomisationRequest, CustomisationService, MealCustomisation,
};
use crate::{error::AppResult, infrastructure::auth::AuthUser};

#[derive(Debug, Deserialize)]
pub struct ListCustomisationsQuery {
    pub date: NaiveDate,
}

pub struct CustomisationController {
    customisation_service: Arc<CustomisationService>,
}

impl CustomisationController {
    pub fn new(customisation_service: Arc<CustomisationService>) -> Self {
        Self {
            customisation_service,
        }
    }

    /// PUT /api/customisations
    pub async fn request_customisation(
        State(controller): State<Arc<CustomisationController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<CustomisationRequest>,
    ) -> AppResult<(StatusCode, Json<MealCustomisation>)> {
        let user_id = auth_user.resolve_target(request.user_id)?;
        let customisation = controller
            .customisation_service
            .request_customisation(user_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(customisation)))
    }

    /// GET /api/customisations?date= (admin)
    pub async fn list_customisations(
        State(controller): State<Arc<CustomisationController>>,
        Extension(auth_user): Extension<AuthUser>,
        Query(query): Query<ListCustomisationsQuery>,
    ) -> AppResult<Json<Vec<CustomisationListing>>> {
        auth_user.require_admin()?;
        let listings = controller
            .customisation_service
            .list_customisations(query.date)
            .await?;
        Ok(Json(listings))
    }
}
