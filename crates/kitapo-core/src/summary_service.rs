//! Spend-vs-plan aggregation over an already-fetched period snapshot.

use std::collections::HashMap;

use uuid::Uuid;

use kitapo_domain::{Budget, BudgetSummary, Category, Expense, Period, PeriodType};

const UNKNOWN_CATEGORY: &str = "Unknown category";

/// Stateless aggregation over period snapshots. Pure function of its
/// arguments; safe to call concurrently from as many panels as needed.
pub struct SummaryService;

impl SummaryService {
    /// Produces one summary row per category for the given period.
    ///
    /// - Every category in `categories` gets a row, all-zero if idle.
    /// - An explicit budget counts only on an exact canonical-start match.
    /// - For non-day windows without an explicit row, daily budgets inside
    ///   the window extrapolate the plan (`is_extrapolated`).
    /// - Budgets referencing a category missing from `categories` produce a
    ///   labeled row instead of aborting the computation.
    /// - Rows are ordered by category name, then id, so output is
    ///   deterministic regardless of store ordering.
    pub fn summarize(
        period: &Period,
        budgets: &[Budget],
        expenses: &[Expense],
        categories: &[Category],
    ) -> Vec<BudgetSummary> {
        let mut explicit: HashMap<Uuid, &Budget> = HashMap::new();
        let mut daily_totals: HashMap<Uuid, f64> = HashMap::new();

        for budget in budgets {
            if budget.matches_period(period) {
                explicit.insert(budget.category_id, budget);
            } else if period.period_type() != PeriodType::Day
                && budget.period_type == PeriodType::Day
                && period.contains(budget.start_date)
            {
                *daily_totals.entry(budget.category_id).or_default() += budget.amount;
            }
        }

        let mut spent: HashMap<Uuid, f64> = HashMap::new();
        for expense in expenses {
            // unassigned expenses are excluded from per-category totals
            let Some(category_id) = expense.category_id else {
                continue;
            };
            if period.contains(expense.date) {
                *spent.entry(category_id).or_default() += expense.amount;
            }
        }

        let known: HashMap<Uuid, &Category> =
            categories.iter().map(|category| (category.id, category)).collect();

        let mut rows: Vec<(Uuid, String)> = categories
            .iter()
            .map(|category| (category.id, category.name.clone()))
            .collect();
        for category_id in explicit.keys().chain(daily_totals.keys()) {
            if !known.contains_key(category_id) && !rows.iter().any(|(id, _)| id == category_id) {
                tracing::warn!(%category_id, "budget references a missing category");
                rows.push((*category_id, UNKNOWN_CATEGORY.to_string()));
            }
        }
        // dedup on id first: sorting by name would leave same-id entries
        // with different names non-adjacent
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows.dedup_by_key(|(id, _)| *id);
        rows.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

        rows.into_iter()
            .map(|(category_id, name)| {
                let spent_amount = spent.get(&category_id).copied().unwrap_or(0.0);
                match explicit.get(&category_id) {
                    Some(budget) => BudgetSummary::from_parts(
                        Some(budget.id),
                        category_id,
                        name,
                        budget.amount,
                        spent_amount,
                        false,
                    ),
                    None => match daily_totals.get(&category_id) {
                        Some(&planned) => BudgetSummary::from_parts(
                            None,
                            category_id,
                            name,
                            planned,
                            spent_amount,
                            true,
                        ),
                        None => BudgetSummary::from_parts(
                            None,
                            category_id,
                            name,
                            0.0,
                            spent_amount,
                            false,
                        ),
                    },
                }
            })
            .collect()
    }
}
