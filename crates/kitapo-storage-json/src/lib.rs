//! Filesystem JSON persistence for the budget engine.
//!
//! Each owner's data lives in one workbook file. Every write rewrites the
//! workbook through a tmp file and an atomic rename, which is what makes the
//! recurring batch upsert all-or-nothing: either the new file replaces the
//! old one or the old one survives intact.

pub mod config;

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kitapo_core::{BudgetStore, CoreError};
use kitapo_domain::{
    Budget, Category, Expense, ExpenseRecord, Period, PeriodType, SaleRecord,
};

pub use config::StoreConfig;

const WORKBOOK_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Everything the store holds for one owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
}

/// One-workbook-per-owner JSON store.
#[derive(Debug, Clone)]
pub struct JsonBudgetStore {
    data_dir: PathBuf,
}

impl JsonBudgetStore {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, CoreError> {
        Self::new(config.data_dir.clone())
    }

    pub fn workbook_path(&self, owner_id: Uuid) -> PathBuf {
        self.data_dir
            .join(format!("{owner_id}.{WORKBOOK_EXTENSION}"))
    }

    /// Loads the owner's workbook; a missing file is an empty workbook.
    pub fn load_workbook(&self, owner_id: Uuid) -> Result<Workbook, CoreError> {
        let path = self.workbook_path(owner_id);
        if !path.exists() {
            return Ok(Workbook::default());
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    /// Persists the workbook atomically (tmp write + rename).
    pub fn save_workbook(&self, owner_id: Uuid, workbook: &Workbook) -> Result<(), CoreError> {
        let path = self.workbook_path(owner_id);
        let json = serde_json::to_string_pretty(workbook)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Validated sales for the dashboard statistics; rows with broken
    /// amounts are logged and skipped.
    pub fn sales(&self, owner_id: Uuid) -> Result<Vec<kitapo_domain::Sale>, CoreError> {
        let workbook = self.load_workbook(owner_id)?;
        Ok(workbook
            .sales
            .iter()
            .filter_map(|record| match record.validate() {
                Ok(sale) => Some(sale),
                Err(err) => {
                    tracing::warn!(date = %record.date, %err, "skipping malformed sale row");
                    None
                }
            })
            .collect())
    }

    pub fn add_expense(&self, owner_id: Uuid, expense: ExpenseRecord) -> Result<(), CoreError> {
        let mut workbook = self.load_workbook(owner_id)?;
        workbook.expenses.push(expense);
        self.save_workbook(owner_id, &workbook)
    }

    pub fn add_sale(&self, owner_id: Uuid, sale: SaleRecord) -> Result<(), CoreError> {
        let mut workbook = self.load_workbook(owner_id)?;
        workbook.sales.push(sale);
        self.save_workbook(owner_id, &workbook)
    }

    fn mutate<F>(&self, owner_id: Uuid, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Workbook),
    {
        let mut workbook = self.load_workbook(owner_id)?;
        apply(&mut workbook);
        self.save_workbook(owner_id, &workbook)
    }
}

fn upsert_row(budgets: &mut Vec<Budget>, budget: &Budget) {
    match budgets
        .iter_mut()
        .find(|existing| existing.key() == budget.key())
    {
        Some(existing) => existing.amount = budget.amount,
        None => budgets.push(budget.clone()),
    }
}

impl BudgetStore for JsonBudgetStore {
    fn categories(&self, owner_id: Uuid) -> Result<Vec<Category>, CoreError> {
        Ok(self.load_workbook(owner_id)?.categories)
    }

    fn add_category(&self, category: &Category) -> Result<(), CoreError> {
        self.mutate(category.owner_id, |workbook| {
            workbook.categories.push(category.clone());
        })
    }

    fn delete_category(&self, owner_id: Uuid, category_id: Uuid) -> Result<(), CoreError> {
        self.mutate(owner_id, |workbook| {
            workbook
                .categories
                .retain(|category| category.id != category_id);
            // cascade: the category's budgets go with it
            workbook
                .budgets
                .retain(|budget| budget.category_id != category_id);
        })
    }

    fn budgets_for_period(
        &self,
        owner_id: Uuid,
        period_type: PeriodType,
        start_date: NaiveDate,
    ) -> Result<Vec<Budget>, CoreError> {
        Ok(self
            .load_workbook(owner_id)?
            .budgets
            .into_iter()
            .filter(|budget| {
                budget.period_type == period_type && budget.start_date == start_date
            })
            .collect())
    }

    fn daily_budgets_in(&self, owner_id: Uuid, period: &Period) -> Result<Vec<Budget>, CoreError> {
        Ok(self
            .load_workbook(owner_id)?
            .budgets
            .into_iter()
            .filter(|budget| {
                budget.period_type == PeriodType::Day && period.contains(budget.start_date)
            })
            .collect())
    }

    fn expenses_in(&self, owner_id: Uuid, period: &Period) -> Result<Vec<Expense>, CoreError> {
        Ok(self
            .load_workbook(owner_id)?
            .expenses
            .iter()
            .filter(|record| period.contains(record.date))
            .filter_map(|record| match record.validate() {
                Ok(expense) => Some(expense),
                Err(err) => {
                    tracing::warn!(date = %record.date, %err, "skipping malformed expense row");
                    None
                }
            })
            .collect())
    }

    fn upsert_budget(&self, budget: &Budget) -> Result<(), CoreError> {
        self.mutate(budget.owner_id, |workbook| {
            upsert_row(&mut workbook.budgets, budget);
        })
    }

    fn upsert_budgets(&self, budgets: &[Budget]) -> Result<(), CoreError> {
        let Some(first) = budgets.first() else {
            return Ok(());
        };
        // a batch addresses exactly one workbook; a row for another owner
        // would be misfiled where that owner's reads never look
        if let Some(stray) = budgets.iter().find(|b| b.owner_id != first.owner_id) {
            return Err(CoreError::Validation(format!(
                "budget batch mixes owners {} and {}",
                first.owner_id, stray.owner_id
            )));
        }
        // one load, one atomic save: the batch lands as a unit
        self.mutate(first.owner_id, |workbook| {
            for budget in budgets {
                upsert_row(&mut workbook.budgets, budget);
            }
        })
    }

    fn delete_budget(&self, owner_id: Uuid, budget_id: Uuid) -> Result<(), CoreError> {
        self.mutate(owner_id, |workbook| {
            workbook.budgets.retain(|budget| budget.id != budget_id);
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
