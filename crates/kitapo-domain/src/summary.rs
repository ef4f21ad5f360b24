//! Derived spend-vs-plan summaries and their health classification.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Percentage of the plan consumed. Zero when nothing is planned, and not
/// clamped — clamping to a visual maximum is a presentation concern.
pub fn percentage_used(spent: f64, planned: f64) -> f64 {
    if planned <= 0.0 {
        0.0
    } else {
        // multiply before dividing so round figures stay exact (1.1 * 100
        // is not 110.0 in floating point, 110000.0 / 1000.0 is)
        (spent * 100.0) / planned
    }
}

/// What is left of the plan; negative when overspent.
pub fn remaining(planned: f64, spent: f64) -> f64 {
    planned - spent
}

/// Health signal derived from the consumed percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetHealth {
    OnTrack,
    Warning,
    OverBudget,
}

impl BudgetHealth {
    /// Thresholds: below 80 on track, 80 to 100 inclusive warning, above 100
    /// over budget. Exactly 80 is a warning.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 100.0 {
            BudgetHealth::OverBudget
        } else if percentage >= 80.0 {
            BudgetHealth::Warning
        } else {
            BudgetHealth::OnTrack
        }
    }
}

impl fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetHealth::OnTrack => "On Track",
            BudgetHealth::Warning => "Warning",
            BudgetHealth::OverBudget => "Over Budget",
        };
        f.write_str(label)
    }
}

/// One category's spend-vs-plan row for a normalized period. Derived data,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetSummary {
    /// Backing budget row, when an explicit one exists for this period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<Uuid>,
    pub category_id: Uuid,
    pub category_name: String,
    pub planned_amount: f64,
    pub spent_amount: f64,
    pub remaining_amount: f64,
    pub percentage_used: f64,
    /// Set when the plan was extrapolated from a recurring daily rate rather
    /// than read from an explicit row.
    pub is_extrapolated: bool,
}

impl BudgetSummary {
    /// Assembles a row, deriving the remaining amount and percentage.
    pub fn from_parts(
        budget_id: Option<Uuid>,
        category_id: Uuid,
        category_name: impl Into<String>,
        planned_amount: f64,
        spent_amount: f64,
        is_extrapolated: bool,
    ) -> Self {
        Self {
            budget_id,
            category_id,
            category_name: category_name.into(),
            planned_amount,
            spent_amount,
            remaining_amount: remaining(planned_amount, spent_amount),
            percentage_used: percentage_used(spent_amount, planned_amount),
            is_extrapolated,
        }
    }

    pub fn health(&self) -> BudgetHealth {
        BudgetHealth::from_percentage(self.percentage_used)
    }
}

/// Planned/spent totals across a whole summary, for the KPI strip.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryTotals {
    pub planned: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percentage_used: f64,
}

impl SummaryTotals {
    pub fn aggregate(rows: &[BudgetSummary]) -> Self {
        let planned: f64 = rows.iter().map(|row| row.planned_amount).sum();
        let spent: f64 = rows.iter().map(|row| row.spent_amount).sum();
        Self {
            planned,
            spent,
            remaining: remaining(planned, spent),
            percentage_used: percentage_used(spent, planned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_fixtures() {
        assert_eq!(percentage_used(25_000.0, 100_000.0), 25.0);
        assert_eq!(percentage_used(180_000.0, 200_000.0), 90.0);
        assert_eq!(percentage_used(55_000.0, 50_000.0), 110.0);
        assert_eq!(percentage_used(1_000.0, 0.0), 0.0);
        assert_eq!(percentage_used(0.0, 100_000.0), 0.0);
        assert!((percentage_used(33_333.0, 100_000.0) - 33.333).abs() < 0.01);
    }

    #[test]
    fn remaining_fixtures() {
        assert_eq!(remaining(100_000.0, 25_000.0), 75_000.0);
        assert_eq!(remaining(50_000.0, 50_000.0), 0.0);
        assert_eq!(remaining(50_000.0, 55_000.0), -5_000.0);
    }

    #[test]
    fn health_boundaries() {
        assert_eq!(BudgetHealth::from_percentage(0.0), BudgetHealth::OnTrack);
        assert_eq!(BudgetHealth::from_percentage(79.0), BudgetHealth::OnTrack);
        // exactly 80 is a warning, not on-track
        assert_eq!(BudgetHealth::from_percentage(80.0), BudgetHealth::Warning);
        assert_eq!(BudgetHealth::from_percentage(100.0), BudgetHealth::Warning);
        assert_eq!(
            BudgetHealth::from_percentage(101.0),
            BudgetHealth::OverBudget
        );
        assert_eq!(
            BudgetHealth::from_percentage(200.0),
            BudgetHealth::OverBudget
        );
    }

    #[test]
    fn from_parts_derives_fields() {
        let row = BudgetSummary::from_parts(
            None,
            Uuid::new_v4(),
            "Transport",
            50_000.0,
            55_000.0,
            false,
        );
        assert_eq!(row.remaining_amount, -5_000.0);
        assert_eq!(row.percentage_used, 110.0);
        assert_eq!(row.health(), BudgetHealth::OverBudget);
    }

    #[test]
    fn totals_aggregate_across_rows() {
        let owner = Uuid::new_v4();
        let rows = vec![
            BudgetSummary::from_parts(None, owner, "A", 100_000.0, 25_000.0, false),
            BudgetSummary::from_parts(None, owner, "B", 50_000.0, 15_000.0, false),
            BudgetSummary::from_parts(None, owner, "C", 200_000.0, 180_000.0, false),
        ];
        let totals = SummaryTotals::aggregate(&rows);
        assert_eq!(totals.planned, 350_000.0);
        assert_eq!(totals.spent, 220_000.0);
        assert_eq!(totals.remaining, 130_000.0);

        let empty = SummaryTotals::aggregate(&[]);
        assert_eq!(empty.planned, 0.0);
        assert_eq!(empty.spent, 0.0);
        assert_eq!(empty.percentage_used, 0.0);
    }
}
