use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::infrastructure::scheduler::{JobReport, MealScheduler, ScheduledJob};
use crate::{
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

pub struct JobsController {
    scheduler: Arc<MealScheduler>,
}

impl JobsController {
    pub fn new(scheduler: Arc<MealScheduler>) -> Self {
        Self { scheduler }
    }

    /// POST /api/admin/jobs/{job} - Run a scheduled job now for today's date (admin)
    pub async fn run_job(
        State(controller): State<Arc<JobsController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(job): Path<String>,
    ) -> AppResult<Json<JobReport>> {
        auth_user.require_admin()?;
        let job: ScheduledJob = job.parse().map_err(AppError::NotFound)?;

        tracing::info!(job = %job, admin_id = %auth_user.user_id, "Manual job run requested");

        let report = controller.scheduler.run_now(job).await?;
        Ok(Json(report))
    }
}
