//! Process-local adapters for every repository port.
//!
//! They honour the same contracts as the Postgres adapters (conditional
//! updates, uniqueness, ordering) and back the test suites and local runs
//! without a database.

use crate::domain::activity::{Activity, ActivityRepository};
use crate::domain::cancellation::{CancellationRepository, MealCancellation};
use crate::domain::customisation::{CustomisationRepository, MealCustomisation};
use crate::domain::holiday::{Holiday, HolidayRepository};
use crate::domain::ledger::{
    DebitOutcome, LedgerRepository, MealBalance, NewPurchase, SubscriptionPurchase,
    TransferOutcome,
};
use crate::domain::menu::{DailyMenu, ItemRemoval, MenuRepository};
use crate::domain::shared::{MealSelection, MealType};
use crate::domain::user::{User, UserDirectory};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.write().insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().get(&user_id).cloned())
    }

    async fn find_many(&self, user_ids: &[Uuid]) -> AppResult<HashMap<Uuid, User>> {
        let users = self.users.read();
        Ok(user_ids
            .iter()
            .filter_map(|id| users.get(id).map(|u| (*id, u.clone())))
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryLedgerRepository {
    balances: RwLock<HashMap<Uuid, MealBalance>>,
    purchases: RwLock<Vec<SubscriptionPurchase>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds or overwrites a balance directly
    pub fn put_balance(&self, balance: MealBalance) {
        self.balances.write().insert(balance.user_id, balance);
    }

    pub fn balance(&self, user_id: Uuid) -> Option<MealBalance> {
        self.balances.read().get(&user_id).cloned()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn apply_purchase(&self, purchase: &NewPurchase) -> AppResult<MealBalance> {
        let mut balances = self.balances.write();
        let balance = balances
            .entry(purchase.user_id)
            .and_modify(|existing| existing.absorb(purchase))
            .or_insert_with(|| MealBalance::opened_by(purchase))
            .clone();
        self.purchases.write().push(purchase.to_record());
        Ok(balance)
    }

    async fn find_balance(&self, user_id: Uuid) -> AppResult<Option<MealBalance>> {
        Ok(self.balance(user_id))
    }

    async fn latest_purchase(&self, user_id: Uuid) -> AppResult<Option<SubscriptionPurchase>> {
        Ok(self
            .purchases
            .read()
            .iter()
            .rev()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn decrement(&self, user_id: Uuid, meal: MealType, amount: i32) -> AppResult<bool> {
        let mut balances = self.balances.write();
        match balances.get_mut(&user_id) {
            Some(balance) if balance.credits(meal) >= amount => {
                *balance.credits_mut(meal) -= amount;
                balance.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn debit_once(
        &self,
        user_id: Uuid,
        meal: MealType,
        on: NaiveDate,
    ) -> AppResult<DebitOutcome> {
        let mut balances = self.balances.write();
        let Some(balance) = balances.get_mut(&user_id) else {
            return Ok(DebitOutcome::NoBalance);
        };
        if balance.last_debit_on(meal) == Some(on) {
            return Ok(DebitOutcome::AlreadyDebited);
        }
        if balance.credits(meal) <= 0 {
            return Ok(DebitOutcome::NoBalance);
        }
        *balance.credits_mut(meal) -= 1;
        balance.set_last_debit_on(meal, on);
        balance.updated_at = Utc::now();
        Ok(DebitOutcome::Debited {
            remaining: balance.credits(meal),
        })
    }

    async fn find_with_credits(&self, meal: MealType) -> AppResult<Vec<MealBalance>> {
        Ok(self
            .balances
            .read()
            .values()
            .filter(|b| b.credits(meal) > 0)
            .cloned()
            .collect())
    }

    async fn find_with_pending_next_day(&self) -> AppResult<Vec<MealBalance>> {
        Ok(self
            .balances
            .read()
            .values()
            .filter(|b| b.has_pending_next_day())
            .cloned()
            .collect())
    }

    async fn transfer_next_day(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<TransferOutcome> {
        let mut balances = self.balances.write();
        let Some(balance) = balances.get_mut(&user_id) else {
            return Ok(TransferOutcome::NothingPending);
        };
        if !balance.has_pending_next_day() {
            return Ok(TransferOutcome::NothingPending);
        }
        if !balance.has_started(today) {
            return Ok(TransferOutcome::NotStarted);
        }
        let lunch = std::mem::take(&mut balance.next_day_lunch_meals);
        let dinner = std::mem::take(&mut balance.next_day_dinner_meals);
        balance.lunch_meals += lunch;
        balance.dinner_meals += dinner;
        balance.updated_at = Utc::now();
        Ok(TransferOutcome::Transferred { lunch, dinner })
    }
}

#[derive(Default)]
pub struct InMemoryCancellationRepository {
    rows: RwLock<Vec<MealCancellation>>,
}

impl InMemoryCancellationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CancellationRepository for InMemoryCancellationRepository {
    async fn insert(&self, cancellation: &MealCancellation) -> AppResult<()> {
        let mut rows = self.rows.write();
        let duplicate = rows.iter().any(|c| {
            c.user_id == cancellation.user_id
                && c.start_date == cancellation.start_date
                && c.end_date == cancellation.end_date
                && c.meal_type == cancellation.meal_type
        });
        if duplicate {
            return Err(AppError::Conflict(
                "Meal cancellation already exists".to_string(),
            ));
        }
        rows.push(cancellation.clone());
        Ok(())
    }

    async fn exists(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        meal_type: MealSelection,
    ) -> AppResult<bool> {
        Ok(self.rows.read().iter().any(|c| {
            c.user_id == user_id
                && c.start_date == start_date
                && c.end_date == end_date
                && c.meal_type == meal_type
        }))
    }

    async fn find_active_on(
        &self,
        date: NaiveDate,
        meal: MealType,
    ) -> AppResult<Vec<MealCancellation>> {
        Ok(self
            .rows
            .read()
            .iter()
            .filter(|c| c.covers(date, meal))
            .cloned()
            .collect())
    }

    async fn list(&self, active_on: Option<NaiveDate>) -> AppResult<Vec<MealCancellation>> {
        let mut rows: Vec<MealCancellation> = self
            .rows
            .read()
            .iter()
            .filter(|c| active_on.map_or(true, |date| c.contains(date)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.created_at.cmp(&a.created_at)));
        Ok(rows)
    }
}

#[derive(Default)]
pub struct InMemoryHolidayRepository {
    rows: RwLock<Vec<Holiday>>,
}

impl InMemoryHolidayRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HolidayRepository for InMemoryHolidayRepository {
    async fn is_holiday(&self, date: NaiveDate) -> AppResult<bool> {
        Ok(self.rows.read().iter().any(|h| h.date == date))
    }

    async fn list(&self) -> AppResult<Vec<Holiday>> {
        let mut rows = self.rows.read().clone();
        rows.sort_by_key(|h| h.date);
        Ok(rows)
    }

    async fn insert(&self, holiday: &Holiday) -> AppResult<()> {
        let mut rows = self.rows.write();
        if rows.iter().any(|h| h.date == holiday.date) {
            return Err(AppError::Conflict(format!(
                "Holiday on {} already exists",
                holiday.date
            )));
        }
        rows.push(holiday.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryActivityRepository {
    rows: RwLock<Vec<Activity>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn append(&self, activity: &Activity) -> AppResult<()> {
        self.rows.write().push(activity.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Activity>> {
        let mut rows: Vec<Activity> = self
            .rows
            .read()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }
}

#[derive(Default)]
pub struct InMemoryCustomisationRepository {
    rows: RwLock<Vec<MealCustomisation>>,
}

impl InMemoryCustomisationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomisationRepository for InMemoryCustomisationRepository {
    async fn insert(&self, customisation: &MealCustomisation) -> AppResult<()> {
        self.rows.write().push(customisation.clone());
        Ok(())
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<MealCustomisation>> {
        Ok(self
            .rows
            .read()
            .iter()
            .filter(|c| c.date == date)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryMenuRepository {
    rows: RwLock<Vec<DailyMenu>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn upsert(&self, menu: &DailyMenu) -> AppResult<(DailyMenu, bool)> {
        let mut rows = self.rows.write();
        let existing = rows
            .iter_mut()
            .find(|m| m.date == menu.date && m.meal_type == menu.meal_type);
        match existing {
            Some(stored) => {
                stored.items = menu.items.clone();
                stored.updated_by = menu.updated_by;
                stored.updated_at = menu.updated_at;
                Ok((stored.clone(), false))
            }
            None => {
                rows.push(menu.clone());
                Ok((menu.clone(), true))
            }
        }
    }

    async fn find_by_date(
        &self,
        date: NaiveDate,
        meal: Option<MealType>,
    ) -> AppResult<Vec<DailyMenu>> {
        let mut rows: Vec<DailyMenu> = self
            .rows
            .read()
            .iter()
            .filter(|m| m.date == date && meal.map_or(true, |meal| m.meal_type == meal))
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.meal_type == MealType::Dinner);
        Ok(rows)
    }

    async fn remove_item(&self, menu_id: Uuid, item_id: Uuid) -> AppResult<ItemRemoval> {
        let mut rows = self.rows.write();
        let Some(index) = rows.iter().position(|m| m.id == menu_id) else {
            return Ok(ItemRemoval::MenuNotFound);
        };
        let Some(remaining) = rows[index].without_item(item_id) else {
            return Ok(ItemRemoval::ItemNotFound);
        };
        if remaining.is_empty() {
            rows.remove(index);
            return Ok(ItemRemoval::MenuDeleted);
        }
        rows[index].items.0 = remaining;
        rows[index].updated_at = Utc::now();
        Ok(ItemRemoval::Removed)
    }
}
