//! Amount coercion at the store-read boundary.
//!
//! Loosely-typed stores hand back numeric columns as either JSON numbers or
//! numeric strings. Rows are parsed into validated `f64` values here, before
//! any aggregation sees them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An amount exactly as the store returned it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Parses into a non-negative finite amount.
    pub fn parse_non_negative(&self) -> Result<f64, AmountError> {
        let value = match self {
            RawAmount::Number(value) => *value,
            RawAmount::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| AmountError::NotNumeric(text.clone()))?,
        };
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value < 0.0 {
            return Err(AmountError::Negative(value));
        }
        Ok(value)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Why an amount failed validation.
pub enum AmountError {
    NotNumeric(String),
    Negative(f64),
    NotFinite,
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::NotNumeric(text) => write!(f, "amount `{text}` is not numeric"),
            AmountError::Negative(value) => write!(f, "amount {value} is negative"),
            AmountError::NotFinite => f.write_str("amount is not finite"),
        }
    }
}

impl std::error::Error for AmountError {}
