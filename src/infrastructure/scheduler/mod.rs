//! Clock-driven trigger for the daily ledger jobs.
//!
//! Trigger times are wall-clock times in the reference offset. Each tick
//! runs every job whose trigger instant fell between the previous tick and
//! now, so a slow or delayed poll never skips a job and never runs one twice.
//!
//! | Job | Default | Days |
//! |-----|---------|------|
//! | `transfer-next-day` | 05:00 | every day |
//! | `debit-lunch` | 11:15 | Monday to Saturday |
//! | `debit-dinner` | 16:45 | Monday to Saturday |

use crate::domain::billing::{BalanceAdjustmentEngine, DebitReport, EngineError, TransferReport};
use crate::domain::shared::{Clock, MealType, ReferenceTime};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledJob {
    TransferNextDay,
    DebitLunch,
    DebitDinner,
}

impl ScheduledJob {
    pub const ALL: [ScheduledJob; 3] = [
        ScheduledJob::TransferNextDay,
        ScheduledJob::DebitLunch,
        ScheduledJob::DebitDinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduledJob::TransferNextDay => "transfer-next-day",
            ScheduledJob::DebitLunch => "debit-lunch",
            ScheduledJob::DebitDinner => "debit-dinner",
        }
    }

    /// No meals are served on Sundays, so debits skip them
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        match self {
            ScheduledJob::TransferNextDay => true,
            ScheduledJob::DebitLunch | ScheduledJob::DebitDinner => weekday != Weekday::Sun,
        }
    }
}

impl fmt::Display for ScheduledJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduledJob {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScheduledJob::ALL
            .into_iter()
            .find(|job| job.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown job '{}', expected transfer-next-day, debit-lunch or debit-dinner",
                    s
                )
            })
    }
}

/// Local trigger times of the daily jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSchedule {
    pub transfer_at: NaiveTime,
    pub lunch_debit_at: NaiveTime,
    pub dinner_debit_at: NaiveTime,
}

impl JobSchedule {
    pub fn trigger_time(&self, job: ScheduledJob) -> NaiveTime {
        match job {
            ScheduledJob::TransferNextDay => self.transfer_at,
            ScheduledJob::DebitLunch => self.lunch_debit_at,
            ScheduledJob::DebitDinner => self.dinner_debit_at,
        }
    }
}

impl Default for JobSchedule {
    fn default() -> Self {
        Self {
            transfer_at: NaiveTime::from_hms_opt(5, 0, 0).unwrap_or_default(),
            lunch_debit_at: NaiveTime::from_hms_opt(11, 15, 0).unwrap_or_default(),
            dinner_debit_at: NaiveTime::from_hms_opt(16, 45, 0).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JobReport {
    Transfer(TransferReport),
    Debit(DebitReport),
}

pub struct MealScheduler {
    engine: Arc<BalanceAdjustmentEngine>,
    clock: Arc<dyn Clock>,
    reference: ReferenceTime,
    schedule: JobSchedule,
    last_tick: Mutex<DateTime<Utc>>,
}

impl MealScheduler {
    /// Jobs due before construction are not backfilled
    pub fn new(
        engine: Arc<BalanceAdjustmentEngine>,
        clock: Arc<dyn Clock>,
        reference: ReferenceTime,
        schedule: JobSchedule,
    ) -> Self {
        let started = clock.now();
        Self {
            engine,
            clock,
            reference,
            schedule,
            last_tick: Mutex::new(started),
        }
    }

    pub fn schedule(&self) -> JobSchedule {
        self.schedule
    }

    /// Jobs whose trigger instant lies in `(from, to]`, oldest first, each
    /// paired with the reference-local date it runs for.
    pub fn due_jobs(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<(ScheduledJob, NaiveDate)> {
        if to <= from {
            return Vec::new();
        }

        let mut due = Vec::new();
        let last_day = self.reference.today(to);
        let mut day = self.reference.today(from);
        while day <= last_day {
            for job in ScheduledJob::ALL {
                if !job.runs_on(day.weekday()) {
                    continue;
                }
                let fires_at = self.reference.to_utc(day, self.schedule.trigger_time(job));
                if fires_at > from && fires_at <= to {
                    due.push((fires_at, job, day));
                }
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        due.sort_by_key(|(fires_at, _, _)| *fires_at);
        due.into_iter().map(|(_, job, day)| (job, day)).collect()
    }

    pub async fn run_job(
        &self,
        job: ScheduledJob,
        date: NaiveDate,
    ) -> Result<JobReport, EngineError> {
        tracing::info!(job = %job, date = %date, "Running scheduled job");
        match job {
            ScheduledJob::TransferNextDay => self
                .engine
                .transfer_next_day_for_all(date)
                .await
                .map(JobReport::Transfer),
            ScheduledJob::DebitLunch => self
                .engine
                .run_debit(MealType::Lunch, date)
                .await
                .map(JobReport::Debit),
            ScheduledJob::DebitDinner => self
                .engine
                .run_debit(MealType::Dinner, date)
                .await
                .map(JobReport::Debit),
        }
    }

    /// Runs `job` for the current reference date, outside the schedule
    pub async fn run_now(&self, job: ScheduledJob) -> Result<JobReport, EngineError> {
        let today = self.reference.today(self.clock.now());
        self.run_job(job, today).await
    }

    /// Runs every job that came due since the previous tick.
    ///
    /// A failing job is logged and does not prevent the remaining ones.
    pub async fn tick(&self) -> Vec<JobReport> {
        let now = self.clock.now();
        let previous = std::mem::replace(&mut *self.last_tick.lock(), now);

        let mut reports = Vec::new();
        for (job, date) in self.due_jobs(previous, now) {
            match self.run_job(job, date).await {
                Ok(report) => reports.push(report),
                Err(e) => tracing::error!(
                    job = %job,
                    date = %date,
                    error = %e,
                    "Scheduled job failed"
                ),
            }
        }
        reports
    }

    /// Polls until the shutdown signal flips to true
    pub async fn run(&self, poll_interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(poll_interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        tracing::info!(
            poll_seconds = poll_interval.as_secs(),
            transfer_at = %self.schedule.transfer_at,
            lunch_debit_at = %self.schedule.lunch_debit_at,
            dinner_debit_at = %self.schedule.dinner_debit_at,
            "Meal scheduler started"
        );

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("Meal scheduler stopping");
                        return;
                    }
                }
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }
    }
}
