pub mod model;

pub use model::{User, UserRole, UserSummary};

use crate::error::AppResult;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// Lookup into the user directory owned by the account service
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Batch lookup; ids with no user are simply absent from the map
    async fn find_many(&self, user_ids: &[Uuid]) -> AppResult<HashMap<Uuid, User>>;
}
