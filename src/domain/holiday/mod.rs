use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

/// A day on which no meals are served or debited
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
}

#[async_trait]
pub trait HolidayRepository: Send + Sync {
    async fn is_holiday(&self, date: NaiveDate) -> AppResult<bool>;

    /// Ordered by date
    async fn list(&self) -> AppResult<Vec<Holiday>>;

    async fn insert(&self, holiday: &Holiday) -> AppResult<()>;
}

pub struct HolidayCalendar {
    holiday_repo: Arc<dyn HolidayRepository>,
}

impl HolidayCalendar {
    pub fn new(holiday_repo: Arc<dyn HolidayRepository>) -> Self {
        Self { holiday_repo }
    }

    /// Fails open: a lookup error counts as a working day so billing never
    /// stalls on a calendar outage.
    pub async fn is_holiday(&self, date: NaiveDate) -> bool {
        match self.holiday_repo.is_holiday(date).await {
            Ok(holiday) => holiday,
            Err(e) => {
                tracing::warn!(
                    date = %date,
                    error = %e,
                    "Holiday lookup failed, treating day as a working day"
                );
                false
            }
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Holiday>> {
        self.holiday_repo.list().await
    }
}
