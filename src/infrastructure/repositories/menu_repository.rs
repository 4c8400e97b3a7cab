use crate::domain::menu::{DailyMenu, ItemRemoval, MenuRepository};
use crate::domain::shared::MealType;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

const MENU_COLUMNS: &str = "id, date, meal_type, items, updated_by, created_at, updated_at";

#[derive(FromRow)]
struct UpsertedMenu {
    #[sqlx(flatten)]
    menu: DailyMenu,
    inserted: bool,
}

pub struct PostgresMenuRepository {
    pool: Arc<DbPool>,
}

impl PostgresMenuRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuRepository for PostgresMenuRepository {
    async fn upsert(&self, menu: &DailyMenu) -> AppResult<(DailyMenu, bool)> {
        let pool = self.pool.as_ref();

        // xmax is zero only for a freshly inserted row version
        let row = sqlx::query_as::<_, UpsertedMenu>(&format!(
            r#"
            INSERT INTO daily_menus (id, date, meal_type, items, updated_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (date, meal_type) DO UPDATE SET
                items = EXCLUDED.items,
                updated_by = EXCLUDED.updated_by,
                updated_at = EXCLUDED.updated_at
            RETURNING {}, (xmax = 0) AS inserted
            "#,
            MENU_COLUMNS
        ))
        .bind(menu.id)
        .bind(menu.date)
        .bind(menu.meal_type)
        .bind(&menu.items)
        .bind(menu.updated_by)
        .bind(menu.updated_at)
        .fetch_one(pool)
        .await?;

        Ok((row.menu, row.inserted))
    }

    async fn find_by_date(
        &self,
        date: NaiveDate,
        meal: Option<MealType>,
    ) -> AppResult<Vec<DailyMenu>> {
        let pool = self.pool.as_ref();
        let menus = sqlx::query_as::<_, DailyMenu>(&format!(
            r#"
            SELECT {}
            FROM daily_menus
            WHERE date = $1 AND ($2::text IS NULL OR meal_type = $2)
            ORDER BY CASE meal_type WHEN 'lunch' THEN 0 ELSE 1 END
            "#,
            MENU_COLUMNS
        ))
        .bind(date)
        .bind(meal)
        .fetch_all(pool)
        .await?;

        Ok(menus)
    }

    async fn remove_item(&self, menu_id: Uuid, item_id: Uuid) -> AppResult<ItemRemoval> {
        let mut tx = self.pool.begin().await?;

        let menu = sqlx::query_as::<_, DailyMenu>(&format!(
            "SELECT {} FROM daily_menus WHERE id = $1 FOR UPDATE",
            MENU_COLUMNS
        ))
        .bind(menu_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(menu) = menu else {
            return Ok(ItemRemoval::MenuNotFound);
        };
        let Some(remaining) = menu.without_item(item_id) else {
            return Ok(ItemRemoval::ItemNotFound);
        };

        let removal = if remaining.is_empty() {
            sqlx::query("DELETE FROM daily_menus WHERE id = $1")
                .bind(menu_id)
                .execute(&mut *tx)
                .await?;
            ItemRemoval::MenuDeleted
        } else {
            sqlx::query("UPDATE daily_menus SET items = $2, updated_at = NOW() WHERE id = $1")
                .bind(menu_id)
                .bind(Json(remaining))
                .execute(&mut *tx)
                .await?;
            ItemRemoval::Removed
        };

        tx.commit().await?;

        Ok(removal)
    }
}
