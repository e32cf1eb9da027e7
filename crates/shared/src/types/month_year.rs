//! Calendar-month keys in `YYYY-MM` form.
//!
//! Budgets are keyed by month, and the spending aggregation scans the
//! expenses whose date falls inside that month. `MonthYear` is validated once
//! at the boundary; everything downstream can rely on it being well formed.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a month-year key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthYearError {
    /// Input is not four digits, a hyphen, and two digits.
    #[error("month-year must be formatted as YYYY-MM, got {0:?}")]
    Malformed(String),

    /// Month component is outside `01`..=`12`.
    #[error("month must be between 01 and 12, got {0:?}")]
    MonthOutOfRange(String),
}

/// A calendar month, e.g. `2024-06`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthYear {
    first_day: NaiveDate,
}

impl MonthYear {
    /// Parses a `YYYY-MM` key.
    ///
    /// # Errors
    ///
    /// Returns `MonthYearError::Malformed` if the shape is wrong and
    /// `MonthYearError::MonthOutOfRange` if the month is not `01`..=`12`.
    pub fn parse(input: &str) -> Result<Self, MonthYearError> {
        let malformed = || MonthYearError::Malformed(input.to_string());

        let bytes = input.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(malformed());
        }

        let year: i32 = input[..4].parse().map_err(|_| malformed())?;
        let month: u32 = input[5..].parse().map_err(|_| malformed())?;
        if !(1..=12).contains(&month) {
            return Err(MonthYearError::MonthOutOfRange(input.to_string()));
        }

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(malformed)
    }

    /// Returns the month a date falls in.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first_day: date - Days::new(u64::from(date.day0())),
        }
    }

    /// Four-digit year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Month number, 1-12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First calendar day of the month (inclusive lower bound).
    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// First day of the following month (exclusive upper bound).
    #[must_use]
    pub fn next_month_first_day(&self) -> NaiveDate {
        self.first_day + Months::new(1)
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl std::str::FromStr for MonthYear {
    type Err = MonthYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthYear {
    type Error = MonthYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthYear> for String {
    fn from(value: MonthYear) -> Self {
        value.to_string()
    }
}
