//! Calendar period normalization for budgeting windows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Granularities a budget plan can be defined over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Day,
    Week,
    Month,
    Quarter,
    Semester,
    Year,
}

impl PeriodType {
    /// Every supported granularity, shortest first.
    pub const ALL: [PeriodType; 6] = [
        PeriodType::Day,
        PeriodType::Week,
        PeriodType::Month,
        PeriodType::Quarter,
        PeriodType::Semester,
        PeriodType::Year,
    ];

    /// The store's lowercase wire string for this granularity.
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodType::Day => "day",
            PeriodType::Week => "week",
            PeriodType::Month => "month",
            PeriodType::Quarter => "quarter",
            PeriodType::Semester => "semester",
            PeriodType::Year => "year",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when parsing an unknown period granularity string.
pub struct UnknownPeriodType(pub String);

impl fmt::Display for UnknownPeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown period granularity `{}`", self.0)
    }
}

impl std::error::Error for UnknownPeriodType {}

impl FromStr for PeriodType {
    type Err = UnknownPeriodType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "day" => Ok(PeriodType::Day),
            "week" => Ok(PeriodType::Week),
            "month" => Ok(PeriodType::Month),
            "quarter" => Ok(PeriodType::Quarter),
            "semester" => Ok(PeriodType::Semester),
            "year" => Ok(PeriodType::Year),
            other => Err(UnknownPeriodType(other.to_string())),
        }
    }
}

/// A canonical budgeting window: both bounds inclusive, always derived from
/// a (reference date, granularity) pair so windows cannot drift from their
/// canonical start. Deliberately not `Deserialize`: the only ways in are
/// [`Period::containing`] and [`Period::shift`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Period {
    period_type: PeriodType,
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Normalizes a reference date into the canonical window containing it.
    ///
    /// All arithmetic is on plain calendar dates; there is no time-of-day or
    /// timezone component, so the same calendar day always normalizes to the
    /// same window.
    pub fn containing(reference: NaiveDate, period_type: PeriodType) -> Self {
        let (start, end) = match period_type {
            PeriodType::Day => (reference, reference),
            PeriodType::Week => {
                // Monday start. num_days_from_monday maps Sunday to 6, which
                // matches the `day || 7` trick in the weekday formula.
                let monday =
                    reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(6))
            }
            PeriodType::Month => (
                first_of_month(reference.year(), reference.month()),
                last_of_month(reference.year(), reference.month()),
            ),
            PeriodType::Quarter => {
                let first_month = (reference.month0() / 3) * 3 + 1;
                (
                    first_of_month(reference.year(), first_month),
                    last_of_month(reference.year(), first_month + 2),
                )
            }
            PeriodType::Semester => {
                let first_month = if reference.month0() < 6 { 1 } else { 7 };
                (
                    first_of_month(reference.year(), first_month),
                    last_of_month(reference.year(), first_month + 5),
                )
            }
            PeriodType::Year => (
                first_of_month(reference.year(), 1),
                last_of_month(reference.year(), 12),
            ),
        };
        Self {
            period_type,
            start,
            end,
        }
    }

    pub fn period_type(&self) -> PeriodType {
        self.period_type
    }

    /// Canonical first date of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the window (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive containment test.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Steps to an adjacent window (negative steps go backwards). The result
    /// is re-normalized, so repeated shifts cannot accumulate drift.
    pub fn shift(&self, steps: i32) -> Self {
        let reference = match self.period_type {
            PeriodType::Day => self.start + Duration::days(steps as i64),
            PeriodType::Week => self.start + Duration::days(steps as i64 * 7),
            PeriodType::Month => shift_month(self.start, steps),
            PeriodType::Quarter => shift_month(self.start, steps * 3),
            PeriodType::Semester => shift_month(self.start, steps * 6),
            PeriodType::Year => shift_month(self.start, steps * 12),
        };
        Self::containing(reference, self.period_type)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}..{}", self.period_type, self.start, self.end)
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // month is always 1..=12 here
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month) - Duration::days(1)
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(last_of_month(year, month as u32).day());
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}
