use crate::domain::shared::{MealSelection, MealType, ReferenceTime};
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowViolation {
    InvalidRange,
    PastDate,
    /// Every meal whose same-day window has closed, not just the first
    CutoffPassed(Vec<MealType>),
}

/// Decides whether a cancellation may be filed at a given instant.
///
/// Same-day cancellations close at each meal's cutoff in reference time.
/// Future start dates carry no time-of-day restriction.
#[derive(Debug, Clone, Copy)]
pub struct CancellationWindowPolicy {
    reference: ReferenceTime,
}

impl CancellationWindowPolicy {
    pub fn new(reference: ReferenceTime) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceTime {
        &self.reference
    }

    pub fn evaluate(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        selection: MealSelection,
        now: DateTime<Utc>,
    ) -> Result<(), WindowViolation> {
        if end_date < start_date {
            return Err(WindowViolation::InvalidRange);
        }

        let today = self.reference.today(now);
        if start_date < today {
            return Err(WindowViolation::PastDate);
        }
        if start_date > today {
            return Ok(());
        }

        let closed: Vec<MealType> = selection
            .meals()
            .into_iter()
            .filter(|meal| self.reference.is_past_cutoff(*meal, now))
            .collect();

        if closed.is_empty() {
            Ok(())
        } else {
            Err(WindowViolation::CutoffPassed(closed))
        }
    }
}
