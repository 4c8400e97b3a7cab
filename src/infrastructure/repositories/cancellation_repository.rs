use crate::domain::cancellation::{CancellationRepository, MealCancellation};
use crate::domain::shared::{MealSelection, MealType};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

pub struct PostgresCancellationRepository {
    pool: Arc<DbPool>,
}

impl PostgresCancellationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CancellationRepository for PostgresCancellationRepository {
    async fn insert(&self, cancellation: &MealCancellation) -> AppResult<()> {
        let pool = self.pool.as_ref();

        sqlx::query(
            r#"
            INSERT INTO meal_cancellations (id, user_id, start_date, end_date, meal_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(cancellation.id)
        .bind(cancellation.user_id)
        .bind(cancellation.start_date)
        .bind(cancellation.end_date)
        .bind(cancellation.meal_type)
        .bind(cancellation.created_at)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Meal cancellation already exists".to_string());
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn exists(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        meal_type: MealSelection,
    ) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM meal_cancellations
                WHERE user_id = $1 AND start_date = $2 AND end_date = $3 AND meal_type = $4
            )
            "#,
        )
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .bind(meal_type)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    async fn find_active_on(
        &self,
        date: NaiveDate,
        meal: MealType,
    ) -> AppResult<Vec<MealCancellation>> {
        let pool = self.pool.as_ref();
        let cancellations = sqlx::query_as::<_, MealCancellation>(
            r#"
            SELECT id, user_id, start_date, end_date, meal_type, created_at
            FROM meal_cancellations
            WHERE start_date <= $1 AND end_date >= $1
              AND meal_type IN ($2, 'both')
            "#,
        )
        .bind(date)
        .bind(meal)
        .fetch_all(pool)
        .await?;

        Ok(cancellations)
    }

    async fn list(&self, active_on: Option<NaiveDate>) -> AppResult<Vec<MealCancellation>> {
        let pool = self.pool.as_ref();
        let cancellations = sqlx::query_as::<_, MealCancellation>(
            r#"
            SELECT id, user_id, start_date, end_date, meal_type, created_at
            FROM meal_cancellations
            WHERE $1::date IS NULL OR (start_date <= $1 AND end_date >= $1)
            ORDER BY start_date DESC, created_at DESC
            "#,
        )
        .bind(active_on)
        .fetch_all(pool)
        .await?;

        Ok(cancellations)
    }
}
