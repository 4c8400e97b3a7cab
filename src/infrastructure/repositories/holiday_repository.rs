use crate::domain::holiday::{Holiday, HolidayRepository};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

pub struct PostgresHolidayRepository {
    pool: Arc<DbPool>,
}

impl PostgresHolidayRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HolidayRepository for PostgresHolidayRepository {
    async fn is_holiday(&self, date: NaiveDate) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM holidays WHERE date = $1)",
        )
        .bind(date)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self) -> AppResult<Vec<Holiday>> {
        let pool = self.pool.as_ref();
        let holidays = sqlx::query_as::<_, Holiday>(
            "SELECT id, date, description FROM holidays ORDER BY date",
        )
        .fetch_all(pool)
        .await?;

        Ok(holidays)
    }

    async fn insert(&self, holiday: &Holiday) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("INSERT INTO holidays (id, date, description) VALUES ($1, $2, $3)")
            .bind(holiday.id)
            .bind(holiday.date)
            .bind(&holiday.description)
            .execute(pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.is_unique_violation() {
                        return AppError::Conflict(format!(
                            "Holiday on {} already exists",
                            holiday.date
                        ));
                    }
                }
                AppError::Database(e)
            })?;

        Ok(())
    }
}
