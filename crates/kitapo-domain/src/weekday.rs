//! Weekday selection for recurring daily budgets.
//!
//! The core uses exactly one weekday encoding: [`chrono::Weekday`], with bit
//! positions taken from `num_days_from_monday()` (Monday = 0 .. Sunday = 6).
//! The web client historically sent Sunday = 0 .. Saturday = 6 indices; those
//! convert once at the boundary via [`WeekdaySet::from_sunday_indices`] and
//! never appear anywhere else.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Compact set of weekdays, one bit per day (bit = `num_days_from_monday()`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty selection.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Monday through Friday, the client's default selection.
    pub fn weekdays_only() -> Self {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ]
        .into_iter()
        .collect()
    }

    /// Every day of the week.
    pub fn full_week() -> Self {
        Self(0b0111_1111)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !(1 << day.num_days_from_monday());
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Selected days in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        let bits = self.0;
        (0u8..7).filter_map(move |offset| {
            if bits & (1 << offset) != 0 {
                Some(weekday_from_monday_offset(offset))
            } else {
                None
            }
        })
    }

    /// Converts the legacy Sunday = 0 .. Saturday = 6 indices used by the
    /// recurring-budget selector UI. Rejects out-of-range indices instead of
    /// guessing.
    pub fn from_sunday_indices(indices: &[u8]) -> Result<Self, InvalidWeekdayIndex> {
        let mut set = Self::empty();
        for &index in indices {
            let day = match index {
                0 => Weekday::Sun,
                1 => Weekday::Mon,
                2 => Weekday::Tue,
                3 => Weekday::Wed,
                4 => Weekday::Thu,
                5 => Weekday::Fri,
                6 => Weekday::Sat,
                other => return Err(InvalidWeekdayIndex(other)),
            };
            set.insert(day);
        }
        Ok(set)
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{day}")?;
            first = false;
        }
        Ok(())
    }
}

fn weekday_from_monday_offset(offset: u8) -> Weekday {
    match offset {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Raised when a Sunday-zero weekday index falls outside 0..=6.
pub struct InvalidWeekdayIndex(pub u8);

impl fmt::Display for InvalidWeekdayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weekday index {} outside 0..=6", self.0)
    }
}

impl std::error::Error for InvalidWeekdayIndex {}
