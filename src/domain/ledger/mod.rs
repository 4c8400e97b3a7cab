pub mod error;
pub mod model;
pub mod service;

pub use error::LedgerError;
pub use model::{
    DebitOutcome, LedgerStanding, MealBalance, MealSplit, NewPurchase, PaymentConfirmation, Plan,
    SubscriptionPurchase, TransferOutcome,
};
pub use service::{LedgerService, LedgerServiceApi};

use crate::domain::shared::MealType;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// Storage for per-user balances and their purchase history.
///
/// Every mutating method must be a single atomic conditional update per
/// user; callers never read-modify-write a balance.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Appends the purchase and adds its credits to the user's balance
    async fn apply_purchase(&self, purchase: &NewPurchase) -> AppResult<MealBalance>;

    async fn find_balance(&self, user_id: Uuid) -> AppResult<Option<MealBalance>>;

    async fn latest_purchase(&self, user_id: Uuid) -> AppResult<Option<SubscriptionPurchase>>;

    /// Subtracts `amount` only when the result stays non-negative
    async fn decrement(&self, user_id: Uuid, meal: MealType, amount: i32) -> AppResult<bool>;

    /// Takes one credit for `meal` unless one was already taken on `on`
    async fn debit_once(&self, user_id: Uuid, meal: MealType, on: NaiveDate)
        -> AppResult<DebitOutcome>;

    /// Balances with at least one current-day credit for `meal`
    async fn find_with_credits(&self, meal: MealType) -> AppResult<Vec<MealBalance>>;

    /// Balances holding next-day credits
    async fn find_with_pending_next_day(&self) -> AppResult<Vec<MealBalance>>;

    /// Moves next-day credits to current-day when the subscription has started by `today`
    async fn transfer_next_day(&self, user_id: Uuid, today: NaiveDate)
        -> AppResult<TransferOutcome>;
}
