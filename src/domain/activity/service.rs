use super::{Activity, ActivityRepository};
use crate::domain::shared::Clock;
use crate::error::AppResult;
use std::sync::Arc;
use uuid::Uuid;

pub struct ActivityService {
    activity_repo: Arc<dyn ActivityRepository>,
    clock: Arc<dyn Clock>,
}

impl ActivityService {
    pub fn new(activity_repo: Arc<dyn ActivityRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            activity_repo,
            clock,
        }
    }

    /// Writes an audit entry. Failures are logged and swallowed: nothing
    /// reads the trail back, so the action that triggered it stands.
    pub async fn record(&self, user_id: Uuid, description: String) {
        let activity = Activity {
            id: Uuid::new_v4(),
            user_id,
            date: self.clock.now(),
            description,
        };

        if let Err(e) = self.activity_repo.append(&activity).await {
            tracing::warn!(
                user_id = %user_id,
                error = %e,
                "Failed to append activity"
            );
        }
    }

    /// Newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Activity>> {
        self.activity_repo.find_by_user(user_id).await
    }
}
