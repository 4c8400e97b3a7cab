use super::meal::MealType;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

const IST_OFFSET_MINUTES: i32 = 5 * 60 + 30;

/// The timezone and meal cutoffs every "today" comparison is made in.
///
/// Dates handed to the ledger, the cancellation policy and the debit engine
/// are calendar dates in this offset, never UTC timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTime {
    offset: FixedOffset,
    lunch_cutoff: NaiveTime,
    dinner_cutoff: NaiveTime,
}

impl ReferenceTime {
    pub fn new(offset: FixedOffset, lunch_cutoff: NaiveTime, dinner_cutoff: NaiveTime) -> Self {
        Self {
            offset,
            lunch_cutoff,
            dinner_cutoff,
        }
    }

    /// Returns `None` when the offset is outside +/- 24h
    pub fn from_offset_minutes(
        minutes: i32,
        lunch_cutoff: NaiveTime,
        dinner_cutoff: NaiveTime,
    ) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self::new(offset, lunch_cutoff, dinner_cutoff))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn local(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local(now).date_naive()
    }

    pub fn cutoff(&self, meal: MealType) -> NaiveTime {
        match meal {
            MealType::Lunch => self.lunch_cutoff,
            MealType::Dinner => self.dinner_cutoff,
        }
    }

    /// True once the local time of day is strictly after the meal's cutoff
    pub fn is_past_cutoff(&self, meal: MealType, now: DateTime<Utc>) -> bool {
        self.local(now).time() > self.cutoff(meal)
    }

    /// The UTC instant of a local wall-clock time on a local date
    pub fn to_utc(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let local = date.and_time(time);
        (local - Duration::seconds(i64::from(self.offset.local_minus_utc()))).and_utc()
    }
}

impl Default for ReferenceTime {
    fn default() -> Self {
        let offset = FixedOffset::east_opt(IST_OFFSET_MINUTES * 60).unwrap_or_else(|| Utc.fix());
        Self::new(
            offset,
            NaiveTime::from_hms_opt(11, 0, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(16, 30, 0).unwrap_or_default(),
        )
    }
}
