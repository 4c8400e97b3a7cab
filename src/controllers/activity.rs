use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::activity::{Activity, ActivityService};
use crate::{error::AppResult, infrastructure::auth::AuthUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    pub user_id: Option<Uuid>,
}

pub struct ActivityController {
    activity_service: Arc<ActivityService>,
}

impl ActivityController {
    pub fn new(activity_service: Arc<ActivityService>) -> Self {
        Self { activity_service }
    }

    /// GET /api/activities?userId= - Audit trail, newest first
    pub async fn list_activities(
        State(controller): State<Arc<ActivityController>>,
        Extension(auth_user): Extension<AuthUser>,
        Query(query): Query<ActivityQuery>,
    ) -> AppResult<Json<Vec<Activity>>> {
        let user_id = auth_user.resolve_target(query.user_id)?;
        let activities = controller.activity_service.list_for_user(user_id).await?;
        Ok(Json(activities))
    }
}
