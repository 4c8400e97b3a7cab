use crate::domain::ledger::{
    DebitOutcome, LedgerRepository, MealBalance, NewPurchase, SubscriptionPurchase,
    TransferOutcome,
};
use crate::domain::shared::MealType;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

const BALANCE_COLUMNS: &str = r#"
    user_id, plan, subscription_start_date,
    lunch_meals, dinner_meals, next_day_lunch_meals, next_day_dinner_meals,
    meal_type, carb_type, last_lunch_debit_on, last_dinner_debit_on,
    created_at, updated_at
"#;

const PURCHASE_COLUMNS: &str = r#"
    id, user_id, plan, subscription_start_date, total_meals, meal_split,
    lunch_meals, dinner_meals, lunch_deferred, dinner_deferred,
    payment_id, order_id, created_at
"#;

pub struct PostgresLedgerRepository {
    pool: Arc<DbPool>,
}

impl PostgresLedgerRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for PostgresLedgerRepository {
    async fn apply_purchase(&self, purchase: &NewPurchase) -> AppResult<MealBalance> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO subscription_purchases (
                id, user_id, plan, subscription_start_date, total_meals, meal_split,
                lunch_meals, dinner_meals, lunch_deferred, dinner_deferred,
                payment_id, order_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(purchase.id)
        .bind(purchase.user_id)
        .bind(purchase.plan)
        .bind(purchase.subscription_start_date)
        .bind(purchase.total_meals)
        .bind(purchase.meal_split)
        .bind(purchase.lunch_meals)
        .bind(purchase.dinner_meals)
        .bind(purchase.lunch_deferred)
        .bind(purchase.dinner_deferred)
        .bind(&purchase.payment_id)
        .bind(&purchase.order_id)
        .bind(purchase.created_at)
        .execute(&mut *tx)
        .await?;

        // The start date only moves when the existing balance is empty
        let balance = sqlx::query_as::<_, MealBalance>(&format!(
            r#"
            INSERT INTO meal_balances (
                user_id, plan, subscription_start_date,
                lunch_meals, dinner_meals, next_day_lunch_meals, next_day_dinner_meals,
                meal_type, carb_type, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ON CONFLICT (user_id) DO UPDATE SET
                plan = EXCLUDED.plan,
                subscription_start_date = CASE
                    WHEN meal_balances.lunch_meals + meal_balances.dinner_meals
                        + meal_balances.next_day_lunch_meals + meal_balances.next_day_dinner_meals = 0
                    THEN EXCLUDED.subscription_start_date
                    ELSE meal_balances.subscription_start_date
                END,
                lunch_meals = meal_balances.lunch_meals + EXCLUDED.lunch_meals,
                dinner_meals = meal_balances.dinner_meals + EXCLUDED.dinner_meals,
                next_day_lunch_meals = meal_balances.next_day_lunch_meals + EXCLUDED.next_day_lunch_meals,
                next_day_dinner_meals = meal_balances.next_day_dinner_meals + EXCLUDED.next_day_dinner_meals,
                meal_type = COALESCE(EXCLUDED.meal_type, meal_balances.meal_type),
                carb_type = COALESCE(EXCLUDED.carb_type, meal_balances.carb_type),
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            BALANCE_COLUMNS
        ))
        .bind(purchase.user_id)
        .bind(purchase.plan)
        .bind(purchase.subscription_start_date)
        .bind(purchase.current_lunch())
        .bind(purchase.current_dinner())
        .bind(purchase.next_day_lunch())
        .bind(purchase.next_day_dinner())
        .bind(&purchase.meal_type)
        .bind(&purchase.carb_type)
        .bind(purchase.created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(balance)
    }

    async fn find_balance(&self, user_id: Uuid) -> AppResult<Option<MealBalance>> {
        let pool = self.pool.as_ref();
        let balance = sqlx::query_as::<_, MealBalance>(&format!(
            "SELECT {} FROM meal_balances WHERE user_id = $1",
            BALANCE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(balance)
    }

    async fn latest_purchase(&self, user_id: Uuid) -> AppResult<Option<SubscriptionPurchase>> {
        let pool = self.pool.as_ref();
        let purchase = sqlx::query_as::<_, SubscriptionPurchase>(&format!(
            r#"
            SELECT {}
            FROM subscription_purchases
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            PURCHASE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(purchase)
    }

    async fn decrement(&self, user_id: Uuid, meal: MealType, amount: i32) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let column = meal.balance_column();
        let result = sqlx::query(&format!(
            r#"
            UPDATE meal_balances
            SET {column} = {column} - $2, updated_at = NOW()
            WHERE user_id = $1 AND {column} >= $2
            "#,
        ))
        .bind(user_id)
        .bind(amount)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn debit_once(
        &self,
        user_id: Uuid,
        meal: MealType,
        on: NaiveDate,
    ) -> AppResult<DebitOutcome> {
        let pool = self.pool.as_ref();
        let column = meal.balance_column();
        let last = meal.last_debit_column();

        // Check-and-set of the per-day marker happens in the same statement
        // as the decrement
        let remaining = sqlx::query_scalar::<_, i32>(&format!(
            r#"
            UPDATE meal_balances
            SET {column} = {column} - 1, {last} = $2, updated_at = NOW()
            WHERE user_id = $1 AND {column} > 0 AND {last} IS DISTINCT FROM $2
            RETURNING {column}
            "#,
        ))
        .bind(user_id)
        .bind(on)
        .fetch_optional(pool)
        .await?;

        if let Some(remaining) = remaining {
            return Ok(DebitOutcome::Debited { remaining });
        }

        let last_debit = sqlx::query_scalar::<_, Option<NaiveDate>>(&format!(
            "SELECT {last} FROM meal_balances WHERE user_id = $1",
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        match last_debit {
            Some(Some(date)) if date == on => Ok(DebitOutcome::AlreadyDebited),
            _ => Ok(DebitOutcome::NoBalance),
        }
    }

    async fn find_with_credits(&self, meal: MealType) -> AppResult<Vec<MealBalance>> {
        let pool = self.pool.as_ref();
        let balances = sqlx::query_as::<_, MealBalance>(&format!(
            "SELECT {} FROM meal_balances WHERE {} > 0 ORDER BY user_id",
            BALANCE_COLUMNS,
            meal.balance_column()
        ))
        .fetch_all(pool)
        .await?;

        Ok(balances)
    }

    async fn find_with_pending_next_day(&self) -> AppResult<Vec<MealBalance>> {
        let pool = self.pool.as_ref();
        let balances = sqlx::query_as::<_, MealBalance>(&format!(
            r#"
            SELECT {}
            FROM meal_balances
            WHERE next_day_lunch_meals > 0 OR next_day_dinner_meals > 0
            ORDER BY user_id
            "#,
            BALANCE_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        Ok(balances)
    }

    async fn transfer_next_day(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<TransferOutcome> {
        let pool = self.pool.as_ref();
        let moved = sqlx::query_as::<_, (i32, i32)>(
            r#"
            WITH pending AS (
                SELECT user_id, next_day_lunch_meals, next_day_dinner_meals
                FROM meal_balances
                WHERE user_id = $1
                  AND subscription_start_date <= $2
                  AND (next_day_lunch_meals > 0 OR next_day_dinner_meals > 0)
                FOR UPDATE
            )
            UPDATE meal_balances b
            SET lunch_meals = b.lunch_meals + pending.next_day_lunch_meals,
                dinner_meals = b.dinner_meals + pending.next_day_dinner_meals,
                next_day_lunch_meals = 0,
                next_day_dinner_meals = 0,
                updated_at = NOW()
            FROM pending
            WHERE b.user_id = pending.user_id
            RETURNING pending.next_day_lunch_meals, pending.next_day_dinner_meals
            "#,
        )
        .bind(user_id)
        .bind(today)
        .fetch_optional(pool)
        .await?;

        if let Some((lunch, dinner)) = moved {
            return Ok(TransferOutcome::Transferred { lunch, dinner });
        }

        let has_pending = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT next_day_lunch_meals > 0 OR next_day_dinner_meals > 0
            FROM meal_balances
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        match has_pending {
            Some(true) => Ok(TransferOutcome::NotStarted),
            _ => Ok(TransferOutcome::NothingPending),
        }
    }
}
