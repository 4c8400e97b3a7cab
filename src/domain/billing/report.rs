use crate::domain::shared::MealType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome counts of one debit run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebitReport {
    pub meal: MealType,
    pub date: NaiveDate,
    pub holiday: bool,
    pub candidates: usize,
    pub eligible: usize,
    pub debited: usize,
    pub excluded_by_cancellation: usize,
    pub excluded_not_started: usize,
    pub already_debited: usize,
    pub exhausted: usize,
    pub failed: usize,
}

impl DebitReport {
    pub fn new(meal: MealType, date: NaiveDate) -> Self {
        Self {
            meal,
            date,
            holiday: false,
            candidates: 0,
            eligible: 0,
            debited: 0,
            excluded_by_cancellation: 0,
            excluded_not_started: 0,
            already_debited: 0,
            exhausted: 0,
            failed: 0,
        }
    }
}

/// Outcome counts of one next-day transfer run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReport {
    pub date: NaiveDate,
    pub pending: usize,
    pub transferred: usize,
    pub not_started: usize,
    pub nothing_pending: usize,
    pub failed: usize,
    pub lunch_credits: i64,
    pub dinner_credits: i64,
}

impl TransferReport {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            pending: 0,
            transferred: 0,
            not_started: 0,
            nothing_pending: 0,
            failed: 0,
            lunch_credits: 0,
            dinner_credits: 0,
        }
    }
}
