//! Calendar months and the inclusive month windows partitions are created for.

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A calendar month, e.g. `2024-02`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// # Panics
    /// If `month` is not in `1..=12`.
    pub const fn new(year: i32, month: u32) -> Self {
        assert!(month >= 1 && month <= 12, "month out of range");
        YearMonth { year, month }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn succ(&self) -> YearMonth {
        if self.month == 12 {
            YearMonth { year: self.year + 1, month: 1 }
        } else {
            YearMonth { year: self.year, month: self.month + 1 }
        }
    }

    /// First day of the following month, the exclusive upper partition bound
    pub fn next_first_day(&self) -> Option<NaiveDate> {
        self.first_day()?.checked_add_months(Months::new(1))
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        YearMonth { year: date.year(), month: date.month() }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ConfigError;

    /// Accepts `YYYY-MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::Invalid(format!("'{}' is not a YYYY-MM month", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(YearMonth { year, month })
    }
}

/// Every month from `first` through `last`, inclusive
pub fn months(first: YearMonth, last: YearMonth) -> impl Iterator<Item = YearMonth> {
    let mut current = Some(first);
    std::iter::from_fn(move || {
        let month = current.filter(|m| *m <= last)?;
        current = Some(month.succ());
        Some(month)
    })
}
