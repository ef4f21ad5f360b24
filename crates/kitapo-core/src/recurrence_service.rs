//! Expansion of recurring daily budgets over a date range.

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use kitapo_domain::{Budget, PeriodType, WeekdaySet};

use crate::{CoreError, CoreResult};

/// A user request to spread a per-day limit across a date range.
#[derive(Debug, Clone)]
pub struct RecurringRequest {
    pub owner_id: Uuid,
    pub category_id: Uuid,
    pub daily_amount: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Days to budget; canonical `chrono::Weekday` encoding.
    pub weekdays: WeekdaySet,
}

/// Pure expansion of [`RecurringRequest`]s into day-granularity budget rows.
/// Persisting the result is the caller's concern and must happen as a single
/// batched upsert.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Rejects invalid requests before any store interaction.
    pub fn validate(request: &RecurringRequest) -> CoreResult<()> {
        if request.end < request.start {
            return Err(CoreError::Validation(format!(
                "end date {} precedes start date {}",
                request.end, request.start
            )));
        }
        if !request.daily_amount.is_finite() || request.daily_amount <= 0.0 {
            return Err(CoreError::Validation(format!(
                "daily amount must be positive and finite, got {}",
                request.daily_amount
            )));
        }
        if request.weekdays.is_empty() {
            // an empty selection would silently create nothing; surface it
            return Err(CoreError::Validation(
                "no weekdays selected for recurring budget".into(),
            ));
        }
        Ok(())
    }

    /// Produces one budget row per matching date, inclusive of both bounds.
    /// Rows carry the natural key, so replaying an overlapping range through
    /// the store updates instead of duplicating.
    pub fn expand(request: &RecurringRequest) -> CoreResult<Vec<Budget>> {
        Self::validate(request)?;
        let mut budgets = Vec::new();
        let mut date = request.start;
        while date <= request.end {
            if request.weekdays.contains(date.weekday()) {
                budgets.push(Budget::new(
                    request.owner_id,
                    request.category_id,
                    PeriodType::Day,
                    date,
                    request.daily_amount,
                ));
            }
            date += Duration::days(1);
        }
        tracing::debug!(
            category_id = %request.category_id,
            start = %request.start,
            end = %request.end,
            rows = budgets.len(),
            "expanded recurring budget request"
        );
        Ok(budgets)
    }
}
