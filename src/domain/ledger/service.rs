use super::error::LedgerError;
use super::{
    LedgerRepository, LedgerStanding, NewPurchase, PaymentConfirmation, Plan, TransferOutcome,
};
use crate::domain::shared::{Clock, MealType, ReferenceTime};
use crate::domain::user::UserDirectory;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct LedgerService {
    ledger_repo: Arc<dyn LedgerRepository>,
    users: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
    reference: ReferenceTime,
}

impl LedgerService {
    pub fn new(
        ledger_repo: Arc<dyn LedgerRepository>,
        users: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
        reference: ReferenceTime,
    ) -> Self {
        Self {
            ledger_repo,
            users,
            clock,
            reference,
        }
    }
}

#[async_trait]
pub trait LedgerServiceApi: Send + Sync {
    /// Credits a confirmed purchase to the user's balance.
    ///
    /// Shares bought after the meal's cutoff land in the next-day fields.
    async fn create_entry(
        &self,
        confirmation: PaymentConfirmation,
    ) -> Result<LedgerStanding, LedgerError>;

    async fn get_standing(&self, user_id: Uuid) -> Result<LedgerStanding, LedgerError>;

    /// Returns false (not an error) when the balance cannot cover `amount`
    async fn decrement(
        &self,
        user_id: Uuid,
        meal: MealType,
        amount: i32,
    ) -> Result<bool, LedgerError>;

    async fn transfer_next_day_to_current(
        &self,
        user_id: Uuid,
    ) -> Result<TransferOutcome, LedgerError>;
}

#[async_trait]
impl LedgerServiceApi for LedgerService {
    async fn create_entry(
        &self,
        confirmation: PaymentConfirmation,
    ) -> Result<LedgerStanding, LedgerError> {
        let plan: Plan = confirmation
            .plan
            .parse()
            .map_err(LedgerError::Validation)?;
        let total_meals = Self::resolve_total(plan, confirmation.total_meals)?;
        Self::check_payment_refs(plan, &confirmation)?;

        self.users
            .find_by_id(confirmation.user_id)
            .await?
            .ok_or(LedgerError::UnknownUser(confirmation.user_id))?;

        let now = self.clock.now();
        let (lunch_meals, dinner_meals) = confirmation.meal_split.allocate(total_meals);
        let lunch_deferred =
            lunch_meals > 0 && self.reference.is_past_cutoff(MealType::Lunch, now);
        let dinner_deferred =
            dinner_meals > 0 && self.reference.is_past_cutoff(MealType::Dinner, now);

        let purchase = NewPurchase {
            id: Uuid::new_v4(),
            user_id: confirmation.user_id,
            plan,
            subscription_start_date: confirmation.start_date,
            total_meals,
            meal_split: confirmation.meal_split,
            lunch_meals,
            dinner_meals,
            lunch_deferred,
            dinner_deferred,
            meal_type: confirmation.meal_type,
            carb_type: confirmation.carb_type,
            payment_id: confirmation.payment_id,
            order_id: confirmation.order_id,
            created_at: now,
        };

        let balance = self.ledger_repo.apply_purchase(&purchase).await?;

        tracing::info!(
            user_id = %purchase.user_id,
            plan = %plan,
            total_meals,
            lunch_meals,
            dinner_meals,
            lunch_deferred,
            dinner_deferred,
            "Purchase credited to ledger"
        );

        Ok(LedgerStanding::new(Some(balance), Some(purchase.to_record())))
    }

    async fn get_standing(&self, user_id: Uuid) -> Result<LedgerStanding, LedgerError> {
        let balance = self.ledger_repo.find_balance(user_id).await?;
        let latest = self.ledger_repo.latest_purchase(user_id).await?;
        Ok(LedgerStanding::new(balance, latest))
    }

    async fn decrement(
        &self,
        user_id: Uuid,
        meal: MealType,
        amount: i32,
    ) -> Result<bool, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::Validation(
                "Decrement amount must be positive".to_string(),
            ));
        }
        Ok(self.ledger_repo.decrement(user_id, meal, amount).await?)
    }

    async fn transfer_next_day_to_current(
        &self,
        user_id: Uuid,
    ) -> Result<TransferOutcome, LedgerError> {
        let today = self.reference.today(self.clock.now());
        Ok(self.ledger_repo.transfer_next_day(user_id, today).await?)
    }
}

impl LedgerService {
    fn resolve_total(plan: Plan, requested: Option<i32>) -> Result<i32, LedgerError> {
        match requested {
            Some(total) if total <= 0 => Err(LedgerError::Validation(
                "totalMeals must be greater than zero".to_string(),
            )),
            Some(total) => Ok(total),
            None => Ok(plan.default_meals()),
        }
    }

    fn check_payment_refs(
        plan: Plan,
        confirmation: &PaymentConfirmation,
    ) -> Result<(), LedgerError> {
        if !plan.requires_payment() {
            return Ok(());
        }
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        if !present(&confirmation.payment_id) || !present(&confirmation.order_id) {
            return Err(LedgerError::Validation(format!(
                "{} requires paymentId and orderId",
                plan
            )));
        }
        Ok(())
    }
}
