use crate::domain::shared::MealType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
pub enum Plan {
    #[serde(rename = "Trial Meal Pack")]
    #[sqlx(rename = "Trial Meal Pack")]
    TrialMealPack,
    #[serde(rename = "Weekly Plan")]
    #[sqlx(rename = "Weekly Plan")]
    WeeklyPlan,
    #[serde(rename = "Monthly Plan")]
    #[sqlx(rename = "Monthly Plan")]
    MonthlyPlan,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::TrialMealPack => "Trial Meal Pack",
            Plan::WeeklyPlan => "Weekly Plan",
            Plan::MonthlyPlan => "Monthly Plan",
        }
    }

    /// Meals granted when the purchase does not state a count
    pub fn default_meals(&self) -> i32 {
        match self {
            Plan::TrialMealPack => 6,
            Plan::WeeklyPlan => 14,
            Plan::MonthlyPlan => 60,
        }
    }

    /// Paid plans must carry the payment and order references
    pub fn requires_payment(&self) -> bool {
        !matches!(self, Plan::TrialMealPack)
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Trial Meal Pack" => Ok(Plan::TrialMealPack),
            "Weekly Plan" => Ok(Plan::WeeklyPlan),
            "Monthly Plan" => Ok(Plan::MonthlyPlan),
            other => Err(format!("Invalid plan: {}", other)),
        }
    }
}

/// How purchased meals are divided between lunch and dinner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealSplit {
    Lunch,
    Dinner,
    Even,
}

impl MealSplit {
    /// Returns `(lunch, dinner)`. An odd even-split gives the extra meal to lunch.
    pub fn allocate(&self, total: i32) -> (i32, i32) {
        match self {
            MealSplit::Lunch => (total, 0),
            MealSplit::Dinner => (0, total),
            MealSplit::Even => (total - total / 2, total / 2),
        }
    }
}

/// The single authoritative credit balance of a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealBalance {
    pub user_id: Uuid,
    pub plan: Plan,
    pub subscription_start_date: NaiveDate,
    pub lunch_meals: i32,
    pub dinner_meals: i32,
    pub next_day_lunch_meals: i32,
    pub next_day_dinner_meals: i32,
    pub meal_type: Option<String>,
    pub carb_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_lunch_debit_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_dinner_debit_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MealBalance {
    /// Balance created by a user's first purchase
    pub fn opened_by(purchase: &NewPurchase) -> Self {
        Self {
            user_id: purchase.user_id,
            plan: purchase.plan,
            subscription_start_date: purchase.subscription_start_date,
            lunch_meals: purchase.current_lunch(),
            dinner_meals: purchase.current_dinner(),
            next_day_lunch_meals: purchase.next_day_lunch(),
            next_day_dinner_meals: purchase.next_day_dinner(),
            meal_type: purchase.meal_type.clone(),
            carb_type: purchase.carb_type.clone(),
            last_lunch_debit_on: None,
            last_dinner_debit_on: None,
            created_at: purchase.created_at,
            updated_at: purchase.created_at,
        }
    }

    /// Adds a later purchase on top of the existing balance.
    ///
    /// The start date only moves when nothing is left on the balance, so
    /// topping up a running subscription never pauses it.
    pub fn absorb(&mut self, purchase: &NewPurchase) {
        if self.total_credits() == 0 {
            self.subscription_start_date = purchase.subscription_start_date;
        }
        self.plan = purchase.plan;
        self.lunch_meals += purchase.current_lunch();
        self.dinner_meals += purchase.current_dinner();
        self.next_day_lunch_meals += purchase.next_day_lunch();
        self.next_day_dinner_meals += purchase.next_day_dinner();
        if purchase.meal_type.is_some() {
            self.meal_type = purchase.meal_type.clone();
        }
        if purchase.carb_type.is_some() {
            self.carb_type = purchase.carb_type.clone();
        }
        self.updated_at = purchase.created_at;
    }

    pub fn credits(&self, meal: MealType) -> i32 {
        match meal {
            MealType::Lunch => self.lunch_meals,
            MealType::Dinner => self.dinner_meals,
        }
    }

    pub fn credits_mut(&mut self, meal: MealType) -> &mut i32 {
        match meal {
            MealType::Lunch => &mut self.lunch_meals,
            MealType::Dinner => &mut self.dinner_meals,
        }
    }

    pub fn last_debit_on(&self, meal: MealType) -> Option<NaiveDate> {
        match meal {
            MealType::Lunch => self.last_lunch_debit_on,
            MealType::Dinner => self.last_dinner_debit_on,
        }
    }

    pub fn set_last_debit_on(&mut self, meal: MealType, on: NaiveDate) {
        match meal {
            MealType::Lunch => self.last_lunch_debit_on = Some(on),
            MealType::Dinner => self.last_dinner_debit_on = Some(on),
        }
    }

    pub fn total_credits(&self) -> i32 {
        self.lunch_meals + self.dinner_meals + self.next_day_lunch_meals + self.next_day_dinner_meals
    }

    pub fn has_pending_next_day(&self) -> bool {
        self.next_day_lunch_meals > 0 || self.next_day_dinner_meals > 0
    }

    pub fn has_started(&self, on: NaiveDate) -> bool {
        self.subscription_start_date <= on
    }
}

/// Immutable record of one confirmed purchase
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPurchase {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: Plan,
    pub subscription_start_date: NaiveDate,
    pub total_meals: i32,
    pub meal_split: MealSplit,
    pub lunch_meals: i32,
    pub dinner_meals: i32,
    pub lunch_deferred: bool,
    pub dinner_deferred: bool,
    pub payment_id: Option<String>,
    pub order_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated purchase, ready to be written to the ledger
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: Plan,
    pub subscription_start_date: NaiveDate,
    pub total_meals: i32,
    pub meal_split: MealSplit,
    pub lunch_meals: i32,
    pub dinner_meals: i32,
    pub lunch_deferred: bool,
    pub dinner_deferred: bool,
    pub meal_type: Option<String>,
    pub carb_type: Option<String>,
    pub payment_id: Option<String>,
    pub order_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewPurchase {
    pub fn current_lunch(&self) -> i32 {
        if self.lunch_deferred { 0 } else { self.lunch_meals }
    }

    pub fn current_dinner(&self) -> i32 {
        if self.dinner_deferred { 0 } else { self.dinner_meals }
    }

    pub fn next_day_lunch(&self) -> i32 {
        if self.lunch_deferred { self.lunch_meals } else { 0 }
    }

    pub fn next_day_dinner(&self) -> i32 {
        if self.dinner_deferred { self.dinner_meals } else { 0 }
    }

    pub fn to_record(&self) -> SubscriptionPurchase {
        SubscriptionPurchase {
            id: self.id,
            user_id: self.user_id,
            plan: self.plan,
            subscription_start_date: self.subscription_start_date,
            total_meals: self.total_meals,
            meal_split: self.meal_split,
            lunch_meals: self.lunch_meals,
            dinner_meals: self.dinner_meals,
            lunch_deferred: self.lunch_deferred,
            dinner_deferred: self.dinner_deferred,
            payment_id: self.payment_id.clone(),
            order_id: self.order_id.clone(),
            created_at: self.created_at,
        }
    }
}

/// Payment-confirmed event. Signature verification has already happened upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub user_id: Uuid,
    pub plan: String,
    pub start_date: NaiveDate,
    pub total_meals: Option<i32>,
    pub meal_split: MealSplit,
    pub meal_type: Option<String>,
    pub carb_type: Option<String>,
    pub payment_id: Option<String>,
    pub order_id: Option<String>,
}

/// Response for the subscription standing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStanding {
    pub is_subscribed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<MealBalance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_purchase: Option<SubscriptionPurchase>,
}

impl LedgerStanding {
    pub fn new(balance: Option<MealBalance>, latest_purchase: Option<SubscriptionPurchase>) -> Self {
        Self {
            is_subscribed: balance.as_ref().is_some_and(|b| b.total_credits() > 0),
            subscription: balance,
            latest_purchase,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    Debited { remaining: i32 },
    AlreadyDebited,
    NoBalance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Transferred { lunch: i32, dinner: i32 },
    NothingPending,
    NotStarted,
}
