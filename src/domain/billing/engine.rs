use super::error::EngineError;
use super::report::{DebitReport, TransferReport};
use crate::domain::cancellation::{excluded_users, CancellationRepository};
use crate::domain::holiday::HolidayCalendar;
use crate::domain::ledger::{DebitOutcome, LedgerRepository, TransferOutcome};
use crate::domain::shared::MealType;
use chrono::NaiveDate;
use std::sync::Arc;

/// Scheduled batch debits and next-day credit transfers.
///
/// A run never aborts because one balance fails to update; the failure is
/// logged and counted. Each balance carries the date of its last debit per
/// meal, so invoking the same slot twice on one day takes a single credit.
pub struct BalanceAdjustmentEngine {
    ledger_repo: Arc<dyn LedgerRepository>,
    cancellation_repo: Arc<dyn CancellationRepository>,
    holidays: Arc<HolidayCalendar>,
}

impl BalanceAdjustmentEngine {
    pub fn new(
        ledger_repo: Arc<dyn LedgerRepository>,
        cancellation_repo: Arc<dyn CancellationRepository>,
        holidays: Arc<HolidayCalendar>,
    ) -> Self {
        Self {
            ledger_repo,
            cancellation_repo,
            holidays,
        }
    }

    /// Takes one `meal` credit from every started, non-cancelled balance
    pub async fn run_debit(
        &self,
        meal: MealType,
        today: NaiveDate,
    ) -> Result<DebitReport, EngineError> {
        let mut report = DebitReport::new(meal, today);

        if self.holidays.is_holiday(today).await {
            report.holiday = true;
            tracing::info!(meal = %meal, date = %today, "Holiday, skipping debit run");
            return Ok(report);
        }

        let excluded = excluded_users(self.cancellation_repo.as_ref(), today, meal).await?;
        let candidates = self.ledger_repo.find_with_credits(meal).await?;
        report.candidates = candidates.len();

        for balance in candidates {
            if excluded.contains(&balance.user_id) {
                report.excluded_by_cancellation += 1;
                continue;
            }
            if !balance.has_started(today) {
                report.excluded_not_started += 1;
                continue;
            }
            report.eligible += 1;

            match self.ledger_repo.debit_once(balance.user_id, meal, today).await {
                Ok(DebitOutcome::Debited { .. }) => report.debited += 1,
                Ok(DebitOutcome::AlreadyDebited) => report.already_debited += 1,
                Ok(DebitOutcome::NoBalance) => report.exhausted += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        user_id = %balance.user_id,
                        meal = %meal,
                        error = %e,
                        "Debit failed for balance, continuing"
                    );
                }
            }
        }

        tracing::info!(
            meal = %meal,
            date = %today,
            candidates = report.candidates,
            eligible = report.eligible,
            debited = report.debited,
            excluded_by_cancellation = report.excluded_by_cancellation,
            excluded_not_started = report.excluded_not_started,
            already_debited = report.already_debited,
            failed = report.failed,
            "Debit run finished"
        );

        Ok(report)
    }

    /// Moves every started balance's next-day credits into current-day credits
    pub async fn transfer_next_day_for_all(
        &self,
        today: NaiveDate,
    ) -> Result<TransferReport, EngineError> {
        let mut report = TransferReport::new(today);
        let pending = self.ledger_repo.find_with_pending_next_day().await?;
        report.pending = pending.len();

        for balance in pending {
            match self.ledger_repo.transfer_next_day(balance.user_id, today).await {
                Ok(TransferOutcome::Transferred { lunch, dinner }) => {
                    report.transferred += 1;
                    report.lunch_credits += i64::from(lunch);
                    report.dinner_credits += i64::from(dinner);
                }
                Ok(TransferOutcome::NotStarted) => report.not_started += 1,
                Ok(TransferOutcome::NothingPending) => report.nothing_pending += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        user_id = %balance.user_id,
                        error = %e,
                        "Next-day transfer failed for balance, continuing"
                    );
                }
            }
        }

        tracing::info!(
            date = %today,
            pending = report.pending,
            transferred = report.transferred,
            not_started = report.not_started,
            lunch_credits = report.lunch_credits,
            dinner_credits = report.dinner_credits,
            failed = report.failed,
            "Next-day transfer finished"
        );

        Ok(report)
    }
}
