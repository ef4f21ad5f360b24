//! The store contract the core depends on.

use chrono::NaiveDate;
use uuid::Uuid;

use kitapo_domain::{Budget, Category, Expense, Period, PeriodType};

use crate::CoreError;

/// Abstraction over the persistence backend for categories, budgets, and
/// expense reads.
///
/// Write semantics the core relies on:
/// - `upsert_budget` resolves conflicts on the natural key
///   (owner, category, granularity, canonical start) by updating in place.
/// - `upsert_budgets` applies the whole batch as a unit. All rows must
///   belong to one owner; a mixed batch is rejected before anything is
///   written. Callers treat a failure as unknown completion state and
///   re-run the idempotent upsert.
/// - `delete_category` cascades to the category's budgets.
pub trait BudgetStore: Send + Sync {
    fn categories(&self, owner_id: Uuid) -> Result<Vec<Category>, CoreError>;
    fn add_category(&self, category: &Category) -> Result<(), CoreError>;
    fn delete_category(&self, owner_id: Uuid, category_id: Uuid) -> Result<(), CoreError>;

    /// Budget rows whose canonical start and granularity match exactly.
    fn budgets_for_period(
        &self,
        owner_id: Uuid,
        period_type: PeriodType,
        start_date: NaiveDate,
    ) -> Result<Vec<Budget>, CoreError>;

    /// Day-granularity rows whose date falls inside the window; feeds the
    /// daily-rate extrapolation for longer windows.
    fn daily_budgets_in(&self, owner_id: Uuid, period: &Period) -> Result<Vec<Budget>, CoreError>;

    /// Validated expenses dated inside the window. Amount coercion happens
    /// behind this call; rows that fail validation never surface here.
    fn expenses_in(&self, owner_id: Uuid, period: &Period) -> Result<Vec<Expense>, CoreError>;

    fn upsert_budget(&self, budget: &Budget) -> Result<(), CoreError>;
    fn upsert_budgets(&self, budgets: &[Budget]) -> Result<(), CoreError>;
    fn delete_budget(&self, owner_id: Uuid, budget_id: Uuid) -> Result<(), CoreError>;
}
