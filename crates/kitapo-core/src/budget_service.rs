//! Orchestration between the store and the pure aggregation/expansion logic.

use chrono::NaiveDate;
use uuid::Uuid;

use kitapo_domain::{Budget, BudgetSummary, Period, PeriodType};

use crate::{
    recurrence_service::{RecurrenceService, RecurringRequest},
    storage::BudgetStore,
    summary_service::SummaryService,
    CoreError, CoreResult,
};

/// Stateless entry points tying the store reads to the aggregation core.
/// Each call is a pure function of the store snapshot it fetches; there is
/// no shared mutable state between concurrent calls.
pub struct BudgetService;

impl BudgetService {
    /// Normalizes the reference date, fetches the matching rows, and returns
    /// the per-category summary for the window.
    pub fn period_summary<S: BudgetStore + ?Sized>(
        store: &S,
        owner_id: Uuid,
        period_type: PeriodType,
        reference: NaiveDate,
    ) -> CoreResult<Vec<BudgetSummary>> {
        let period = Period::containing(reference, period_type);
        tracing::debug!(%owner_id, %period, "computing period summary");

        let categories = store.categories(owner_id)?;
        let mut budgets = store.budgets_for_period(owner_id, period_type, period.start())?;
        if period_type != PeriodType::Day {
            budgets.extend(store.daily_budgets_in(owner_id, &period)?);
        }
        let expenses = store.expenses_in(owner_id, &period)?;

        Ok(SummaryService::summarize(
            &period, &budgets, &expenses, &categories,
        ))
    }

    /// Creates or overwrites the budget for (owner, category, granularity,
    /// period containing `reference`). The start date is normalized before
    /// the write, so the natural-key invariant holds no matter what the
    /// caller passes.
    pub fn set_budget<S: BudgetStore + ?Sized>(
        store: &S,
        owner_id: Uuid,
        category_id: Uuid,
        period_type: PeriodType,
        reference: NaiveDate,
        amount: f64,
    ) -> CoreResult<Budget> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::Validation(format!(
                "planned amount must be non-negative and finite, got {amount}"
            )));
        }
        let known = store
            .categories(owner_id)?
            .iter()
            .any(|category| category.id == category_id);
        if !known {
            return Err(CoreError::CategoryNotFound(category_id));
        }
        let budget = Budget::new(owner_id, category_id, period_type, reference, amount);
        store.upsert_budget(&budget)?;
        tracing::info!(budget_id = %budget.id, %period_type, start = %budget.start_date, "budget upserted");
        Ok(budget)
    }

    /// Expands a recurring request and persists it through a single batched
    /// upsert. Returns the number of rows written. On failure the completion
    /// state is unknown; re-running the same request is safe because the
    /// upsert is idempotent.
    pub fn apply_recurring<S: BudgetStore + ?Sized>(
        store: &S,
        request: &RecurringRequest,
    ) -> CoreResult<usize> {
        let budgets = RecurrenceService::expand(request)?;
        store.upsert_budgets(&budgets)?;
        tracing::info!(
            category_id = %request.category_id,
            rows = budgets.len(),
            "recurring budgets written"
        );
        Ok(budgets.len())
    }
}
