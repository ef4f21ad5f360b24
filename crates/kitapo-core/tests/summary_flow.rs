mod common;

use chrono::NaiveDate;
use uuid::Uuid;

use common::MemoryStore;
use kitapo_core::{BudgetService, CoreError};
use kitapo_domain::{
    BudgetHealth, Category, ExpenseRecord, PeriodType, RawAmount, SummaryTotals,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense_record(date: NaiveDate, amount: RawAmount, category_id: Option<Uuid>) -> ExpenseRecord {
    ExpenseRecord {
        date,
        amount,
        category_id,
    }
}

#[test]
fn monthly_summary_over_explicit_budget_and_expenses() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let stock = Category::new(owner, "Stock");
    store.seed_category(stock.clone());

    BudgetService::set_budget(
        &store,
        owner,
        stock.id,
        PeriodType::Month,
        date(2025, 12, 17), // mid-month reference, store gets the canonical 1st
        100_000.0,
    )
    .unwrap();

    store.seed_expense(expense_record(
        date(2025, 12, 3),
        RawAmount::Number(20_000.0),
        Some(stock.id),
    ));
    // numeric string straight from a loosely-typed store
    store.seed_expense(expense_record(
        date(2025, 12, 9),
        RawAmount::Text("5000".into()),
        Some(stock.id),
    ));
    // outside the window
    store.seed_expense(expense_record(
        date(2026, 1, 2),
        RawAmount::Number(999.0),
        Some(stock.id),
    ));

    let rows =
        BudgetService::period_summary(&store, owner, PeriodType::Month, date(2025, 12, 25))
            .unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.planned_amount, 100_000.0);
    assert_eq!(row.spent_amount, 25_000.0);
    assert_eq!(row.remaining_amount, 75_000.0);
    assert_eq!(row.percentage_used, 25.0);
    assert_eq!(row.health(), BudgetHealth::OnTrack);
    assert!(!row.is_extrapolated);
    assert!(row.budget_id.is_some());
}

#[test]
fn month_view_extrapolates_from_daily_budgets() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let meals = Category::new(owner, "Repas");
    store.seed_category(meals.clone());

    for day in [1u32, 2, 3, 4] {
        BudgetService::set_budget(
            &store,
            owner,
            meals.id,
            PeriodType::Day,
            date(2025, 12, day),
            5_000.0,
        )
        .unwrap();
    }

    let rows =
        BudgetService::period_summary(&store, owner, PeriodType::Month, date(2025, 12, 17))
            .unwrap();
    let row = &rows[0];
    assert_eq!(row.planned_amount, 20_000.0);
    assert!(row.is_extrapolated);
    assert_eq!(row.budget_id, None);

    // the day view itself reads the explicit daily row, not an estimate
    let day_rows =
        BudgetService::period_summary(&store, owner, PeriodType::Day, date(2025, 12, 2)).unwrap();
    assert_eq!(day_rows[0].planned_amount, 5_000.0);
    assert!(!day_rows[0].is_extrapolated);
}

#[test]
fn set_budget_overwrites_on_the_natural_key() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let transport = Category::new(owner, "Transport");
    store.seed_category(transport.clone());

    BudgetService::set_budget(
        &store,
        owner,
        transport.id,
        PeriodType::Week,
        date(2025, 12, 17),
        30_000.0,
    )
    .unwrap();
    // same week addressed by a different reference date
    BudgetService::set_budget(
        &store,
        owner,
        transport.id,
        PeriodType::Week,
        date(2025, 12, 19),
        45_000.0,
    )
    .unwrap();

    assert_eq!(store.budget_count(), 1);
    let rows =
        BudgetService::period_summary(&store, owner, PeriodType::Week, date(2025, 12, 15))
            .unwrap();
    assert_eq!(rows[0].planned_amount, 45_000.0);
}

#[test]
fn set_budget_validates_inputs() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let category = Category::new(owner, "Stock");
    store.seed_category(category.clone());

    let err = BudgetService::set_budget(
        &store,
        owner,
        category.id,
        PeriodType::Month,
        date(2025, 12, 1),
        -100.0,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let unknown = Uuid::new_v4();
    let err = BudgetService::set_budget(
        &store,
        owner,
        unknown,
        PeriodType::Month,
        date(2025, 12, 1),
        100.0,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::CategoryNotFound(id) if id == unknown));
    // nothing was written
    assert_eq!(store.budget_count(), 0);
}

#[test]
fn fresh_category_summarizes_to_zeros() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let category = Category::new(owner, "Nouvelle");
    store.seed_category(category.clone());

    let rows =
        BudgetService::period_summary(&store, owner, PeriodType::Quarter, date(2025, 11, 5))
            .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].planned_amount, 0.0);
    assert_eq!(rows[0].spent_amount, 0.0);
    assert_eq!(rows[0].percentage_used, 0.0);
}

#[test]
fn deleted_category_budget_degrades_to_labeled_row() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let doomed = Category::new(owner, "Ephemere");
    store.seed_category(doomed.clone());
    BudgetService::set_budget(
        &store,
        owner,
        doomed.id,
        PeriodType::Month,
        date(2025, 12, 1),
        10_000.0,
    )
    .unwrap();

    // delete the category but leave the budget behind, as if the cascade
    // raced the summary fetch
    store.delete_category_row_only(owner, doomed.id);

    let rows =
        BudgetService::period_summary(&store, owner, PeriodType::Month, date(2025, 12, 10))
            .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category_name, "Unknown category");
    assert_eq!(rows[0].planned_amount, 10_000.0);
}

#[test]
fn malformed_expense_rows_degrade_instead_of_failing() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let category = Category::new(owner, "Stock");
    store.seed_category(category.clone());

    store.seed_expense(expense_record(
        date(2025, 12, 3),
        RawAmount::Text("not-a-number".into()),
        Some(category.id),
    ));
    store.seed_expense(expense_record(
        date(2025, 12, 4),
        RawAmount::Number(8_000.0),
        Some(category.id),
    ));

    let rows =
        BudgetService::period_summary(&store, owner, PeriodType::Month, date(2025, 12, 17))
            .unwrap();
    assert_eq!(rows[0].spent_amount, 8_000.0);
}

#[test]
fn totals_strip_matches_row_sums() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let a = Category::new(owner, "A");
    let b = Category::new(owner, "B");
    store.seed_category(a.clone());
    store.seed_category(b.clone());
    BudgetService::set_budget(&store, owner, a.id, PeriodType::Month, date(2025, 12, 1), 100_000.0)
        .unwrap();
    BudgetService::set_budget(&store, owner, b.id, PeriodType::Month, date(2025, 12, 1), 50_000.0)
        .unwrap();
    store.seed_expense(expense_record(
        date(2025, 12, 5),
        RawAmount::Number(120_000.0),
        Some(a.id),
    ));

    let rows =
        BudgetService::period_summary(&store, owner, PeriodType::Month, date(2025, 12, 17))
            .unwrap();
    let totals = SummaryTotals::aggregate(&rows);
    assert_eq!(totals.planned, 150_000.0);
    assert_eq!(totals.spent, 120_000.0);
    assert_eq!(totals.remaining, 30_000.0);
    assert_eq!(totals.percentage_used, 80.0);

    let overspent = rows.iter().find(|row| row.category_id == a.id).unwrap();
    assert_eq!(overspent.health(), BudgetHealth::OverBudget);
}
