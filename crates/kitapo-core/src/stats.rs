//! Dashboard cashflow statistics: to-date totals and trailing monthly series.

use chrono::{Datelike, Duration, NaiveDate};

use kitapo_domain::{Expense, Sale};

/// Sums for the calendar buckets ending today. The week bucket starts on
/// Monday, consistent with week normalization elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    pub today: f64,
    pub week: f64,
    pub month: f64,
    pub year: f64,
}

impl PeriodTotals {
    fn minus(&self, other: &PeriodTotals) -> PeriodTotals {
        PeriodTotals {
            today: self.today - other.today,
            week: self.week - other.week,
            month: self.month - other.month,
            year: self.year - other.year,
        }
    }
}

/// The sales/expenses/net KPI grid shown on the overview screen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardStats {
    pub sales: PeriodTotals,
    pub expenses: PeriodTotals,
    pub net: PeriodTotals,
}

/// One month of the trailing cashflow chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyFlow {
    pub year: i32,
    pub month: u32,
    pub sales: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Stateless computation over already-fetched, validated records.
pub struct StatsService;

impl StatsService {
    /// Today / week-to-date / month-to-date / year-to-date sums for any
    /// stream of dated amounts. Future-dated records are ignored.
    pub fn period_totals<I>(entries: I, today: NaiveDate) -> PeriodTotals
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let month_start = today.with_day(1).unwrap_or(today);
        let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);

        let mut totals = PeriodTotals::default();
        for (date, amount) in entries {
            if date > today {
                continue;
            }
            if date == today {
                totals.today += amount;
            }
            if date >= week_start {
                totals.week += amount;
            }
            if date >= month_start {
                totals.month += amount;
            }
            if date >= year_start {
                totals.year += amount;
            }
        }
        totals
    }

    /// Builds the KPI grid from validated sale and expense rows.
    pub fn dashboard_stats(sales: &[Sale], expenses: &[Expense], today: NaiveDate) -> DashboardStats {
        let sale_totals =
            Self::period_totals(sales.iter().map(|sale| (sale.date, sale.amount)), today);
        let expense_totals = Self::period_totals(
            expenses.iter().map(|expense| (expense.date, expense.amount)),
            today,
        );
        DashboardStats {
            sales: sale_totals,
            expenses: expense_totals,
            net: sale_totals.minus(&expense_totals),
        }
    }

    /// The trailing `months` calendar months (oldest first, current month
    /// last), each with its sales/expenses/net totals.
    pub fn monthly_series(
        sales: &[Sale],
        expenses: &[Expense],
        today: NaiveDate,
        months: u32,
    ) -> Vec<MonthlyFlow> {
        let mut series = Vec::with_capacity(months as usize);
        for back in (0..months).rev() {
            let (year, month) = step_back_months(today.year(), today.month(), back);
            let sales_total: f64 = sales
                .iter()
                .filter(|sale| sale.date.year() == year && sale.date.month() == month)
                .map(|sale| sale.amount)
                .sum();
            let expenses_total: f64 = expenses
                .iter()
                .filter(|expense| expense.date.year() == year && expense.date.month() == month)
                .map(|expense| expense.amount)
                .sum();
            series.push(MonthlyFlow {
                year,
                month,
                sales: sales_total,
                expenses: expenses_total,
                net: sales_total - expenses_total,
            });
        }
        series
    }
}

fn step_back_months(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}
