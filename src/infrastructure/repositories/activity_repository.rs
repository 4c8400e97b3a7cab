use crate::domain::activity::{Activity, ActivityRepository};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct PostgresActivityRepository {
    pool: Arc<DbPool>,
}

impl PostgresActivityRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn append(&self, activity: &Activity) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO activities (id, user_id, date, description)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(activity.id)
        .bind(activity.user_id)
        .bind(activity.date)
        .bind(&activity.description)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Activity>> {
        let pool = self.pool.as_ref();
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, user_id, date, description
            FROM activities
            WHERE user_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(activities)
    }
}
