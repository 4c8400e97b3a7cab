pub mod model;
pub mod service;

pub use model::Activity;
pub use service::ActivityService;

use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn append(&self, activity: &Activity) -> AppResult<()>;

    /// Newest first
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Activity>>;
}
