use crate::domain::customisation::{CustomisationRepository, MealCustomisation};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

pub struct PostgresCustomisationRepository {
    pool: Arc<DbPool>,
}

impl PostgresCustomisationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomisationRepository for PostgresCustomisationRepository {
    async fn insert(&self, customisation: &MealCustomisation) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO meal_customisations (id, user_id, date, items, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(customisation.id)
        .bind(customisation.user_id)
        .bind(customisation.date)
        .bind(&customisation.items)
        .bind(customisation.created_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<MealCustomisation>> {
        let pool = self.pool.as_ref();
        let customisations = sqlx::query_as::<_, MealCustomisation>(
            r#"
            SELECT id, user_id, date, items, created_at
            FROM meal_customisations
            WHERE date = $1
            ORDER BY created_at
            "#,
        )
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(customisations)
    }
}
