//! In-memory store used by the service integration tests.
#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use uuid::Uuid;

use kitapo_core::{BudgetStore, CoreError};
use kitapo_domain::{Budget, Category, Expense, ExpenseRecord, Period, PeriodType};

#[derive(Default)]
struct Inner {
    categories: Vec<Category>,
    budgets: Vec<Budget>,
    expenses: Vec<ExpenseRecord>,
    fail_writes: bool,
}

/// Mutex-guarded store with the same upsert and cascade semantics the JSON
/// backend provides.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_category(&self, category: Category) {
        self.inner.lock().unwrap().categories.push(category);
    }

    pub fn seed_expense(&self, expense: ExpenseRecord) {
        self.inner.lock().unwrap().expenses.push(expense);
    }

    pub fn budget_count(&self) -> usize {
        self.inner.lock().unwrap().budgets.len()
    }

    pub fn budgets(&self) -> Vec<Budget> {
        self.inner.lock().unwrap().budgets.clone()
    }

    pub fn fail_next_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    /// Removes the category row without cascading, simulating a budget whose
    /// category vanished between fetch and aggregate.
    pub fn delete_category_row_only(&self, owner_id: Uuid, category_id: Uuid) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .categories
            .retain(|category| !(category.owner_id == owner_id && category.id == category_id));
    }

    fn upsert_locked(inner: &mut Inner, budget: &Budget) {
        match inner
            .budgets
            .iter_mut()
            .find(|existing| existing.key() == budget.key())
        {
            Some(existing) => existing.amount = budget.amount,
            None => inner.budgets.push(budget.clone()),
        }
    }
}

impl BudgetStore for MemoryStore {
    fn categories(&self, owner_id: Uuid) -> Result<Vec<Category>, CoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .categories
            .iter()
            .filter(|category| category.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn add_category(&self, category: &Category) -> Result<(), CoreError> {
        self.inner.lock().unwrap().categories.push(category.clone());
        Ok(())
    }

    fn delete_category(&self, owner_id: Uuid, category_id: Uuid) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .categories
            .retain(|category| !(category.owner_id == owner_id && category.id == category_id));
        inner
            .budgets
            .retain(|budget| !(budget.owner_id == owner_id && budget.category_id == category_id));
        Ok(())
    }

    fn budgets_for_period(
        &self,
        owner_id: Uuid,
        period_type: PeriodType,
        start_date: NaiveDate,
    ) -> Result<Vec<Budget>, CoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .budgets
            .iter()
            .filter(|budget| {
                budget.owner_id == owner_id
                    && budget.period_type == period_type
                    && budget.start_date == start_date
            })
            .cloned()
            .collect())
    }

    fn daily_budgets_in(&self, owner_id: Uuid, period: &Period) -> Result<Vec<Budget>, CoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .budgets
            .iter()
            .filter(|budget| {
                budget.owner_id == owner_id
                    && budget.period_type == PeriodType::Day
                    && period.contains(budget.start_date)
            })
            .cloned()
            .collect())
    }

    fn expenses_in(&self, owner_id: Uuid, period: &Period) -> Result<Vec<Expense>, CoreError> {
        let _ = owner_id;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .expenses
            .iter()
            .filter(|record| period.contains(record.date))
            .filter_map(|record| record.validate().ok())
            .collect())
    }

    fn upsert_budget(&self, budget: &Budget) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(CoreError::Storage("write refused".into()));
        }
        Self::upsert_locked(&mut inner, budget);
        Ok(())
    }

    fn upsert_budgets(&self, budgets: &[Budget]) -> Result<(), CoreError> {
        if let Some(first) = budgets.first() {
            if budgets.iter().any(|b| b.owner_id != first.owner_id) {
                return Err(CoreError::Validation("budget batch mixes owners".into()));
            }
        }
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            // batch fails as a unit; nothing is applied
            return Err(CoreError::Storage("batch write refused".into()));
        }
        for budget in budgets {
            Self::upsert_locked(&mut inner, budget);
        }
        Ok(())
    }

    fn delete_budget(&self, owner_id: Uuid, budget_id: Uuid) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .budgets
            .retain(|budget| !(budget.owner_id == owner_id && budget.id == budget_id));
        Ok(())
    }
}
