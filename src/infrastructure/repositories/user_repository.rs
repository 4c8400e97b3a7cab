use crate::domain::user::{User, UserDirectory};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, role, first_name, last_name, email, mobile, postal_address";

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    /// Find user by ID
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Resolve many users in one round trip
    async fn find_many(&self, user_ids: &[Uuid]) -> AppResult<HashMap<Uuid, User>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let pool = self.pool.as_ref();
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ANY($1)",
            USER_COLUMNS
        ))
        .bind(user_ids)
        .fetch_all(pool)
        .await?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
