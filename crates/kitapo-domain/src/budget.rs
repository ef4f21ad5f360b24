//! Budget rows and their natural key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::period::{Period, PeriodType};

/// A planned spending limit for one category over one canonical period.
///
/// At most one budget may exist per [`BudgetKey`]; writes through the store
/// upsert on that key instead of inserting duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category_id: Uuid,
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
    pub amount: f64,
}

impl Budget {
    /// Builds a budget row, normalizing `start_date` to the canonical start
    /// of its period so arbitrary mid-period dates never reach the store.
    pub fn new(
        owner_id: Uuid,
        category_id: Uuid,
        period_type: PeriodType,
        start_date: NaiveDate,
        amount: f64,
    ) -> Self {
        let start_date = Period::containing(start_date, period_type).start();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            category_id,
            period_type,
            start_date,
            amount,
        }
    }

    /// The natural key identifying this row.
    pub fn key(&self) -> BudgetKey {
        BudgetKey {
            owner_id: self.owner_id,
            category_id: self.category_id,
            period_type: self.period_type,
            start_date: self.start_date,
        }
    }

    /// Whether this row is the explicit budget for the given window.
    /// Requires an exact canonical-start match; a row for a different start
    /// inside the same window does not count.
    pub fn matches_period(&self, period: &Period) -> bool {
        self.period_type == period.period_type() && self.start_date == period.start()
    }
}

/// (owner, category, granularity, canonical start) — the tuple that uniquely
/// identifies a budget row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub owner_id: Uuid,
    pub category_id: Uuid,
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
}
