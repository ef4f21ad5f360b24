//! Read-only sale and expense records consumed by aggregation.
//!
//! The raw `*Record` shapes mirror what the store returns (amounts may be
//! numeric strings); `validate()` produces the typed rows the core operates
//! on. Everything beyond `date` and `amount` (and the expense's category) is
//! irrelevant to aggregation and deliberately absent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amount::{AmountError, RawAmount};

/// An expense row as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub amount: RawAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl ExpenseRecord {
    pub fn validate(&self) -> Result<Expense, AmountError> {
        Ok(Expense {
            date: self.date,
            amount: self.amount.parse_non_negative()?,
            category_id: self.category_id,
        })
    }
}

/// A validated expense, safe to aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category_id: Option<Uuid>,
}

/// A sale row as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub amount: RawAmount,
}

impl SaleRecord {
    pub fn validate(&self) -> Result<Sale, AmountError> {
        Ok(Sale {
            date: self.date,
            amount: self.amount.parse_non_negative()?,
        })
    }
}

/// A validated sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sale {
    pub date: NaiveDate,
    pub amount: f64,
}
