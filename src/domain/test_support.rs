use crate::domain::ledger::{MealBalance, Plan};
use crate::domain::shared::ReferenceTime;
use crate::domain::user::{User, UserRole};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Instant for a wall-clock time in the default reference zone
pub fn at(day: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    ReferenceTime::default().to_utc(day, NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
}

pub fn user(role: UserRole, first_name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        role,
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        mobile: "+910000000000".to_string(),
        postal_address: Some("12 MG Road, Pune".to_string()),
    }
}

pub fn balance(user_id: Uuid, start: NaiveDate, lunch: i32, dinner: i32) -> MealBalance {
    let created = Utc.with_ymd_and_hms(2024, 6, 1, 4, 0, 0).unwrap();
    MealBalance {
        user_id,
        plan: Plan::WeeklyPlan,
        subscription_start_date: start,
        lunch_meals: lunch,
        dinner_meals: dinner,
        next_day_lunch_meals: 0,
        next_day_dinner_meals: 0,
        meal_type: Some("veg".to_string()),
        carb_type: Some("low".to_string()),
        last_lunch_debit_on: None,
        last_dinner_debit_on: None,
        created_at: created,
        updated_at: created,
    }
}
