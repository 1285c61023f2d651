//! Calendar value types used across the caches and the forecast engine.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a textual date or amount cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// An immutable (year, month) pair, the time axis unit for all monthly
/// aggregation. Ordered by year, then month.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Strict comparison by year, then month.
    pub fn is_after(self, other: YearMonth) -> bool {
        self > other
    }

    pub fn is_equal(self, other: YearMonth) -> bool {
        self == other
    }

    /// Signed number of months separating `self` from `origin`; negative
    /// when `self` precedes the origin.
    pub fn month_index(self, origin: YearMonth) -> i64 {
        12 * (self.year as i64 - origin.year as i64) + self.month as i64 - origin.month as i64
    }

    /// The month immediately following this one.
    pub fn next(self) -> YearMonth {
        if self.month == 12 {
            YearMonth::new(self.year + 1, 1)
        } else {
            YearMonth::new(self.year, self.month + 1)
        }
    }

    /// Short display label in the `Jan-26` style used by the overview rows.
    pub fn short_label(self) -> String {
        let month = MONTHS_SHORT[(self.month - 1) as usize];
        format!("{}-{:02}", month, self.year.rem_euclid(100))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| FormatError::InvalidDate(s.to_string()))?;
        match (year.parse::<i32>().ok(), month.parse::<u32>().ok()) {
            (Some(y), Some(m)) if (1..=12).contains(&m) => Ok(YearMonth::new(y, m)),
            _ => Err(FormatError::InvalidDate(s.to_string())),
        }
    }
}

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A full calendar date carried by line items.
///
/// The canonical textual encoding is `YYYY-MM-DD`. Deserialising an empty
/// string yields today's local date, which is the add-form default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ymd {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Ymd {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, FormatError> {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(FormatError::InvalidDate(format!(
                "{year:04}-{month:02}-{day:02}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Today in the local calendar.
    pub fn today() -> Self {
        let now = Local::now().date_naive();
        Self {
            year: now.year(),
            month: now.month(),
            day: now.day(),
        }
    }

    pub fn year_month(self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }

    pub fn serialise(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Parses the canonical `YYYY-MM-DD` form. Blank input defaults to
    /// today; only non-empty malformed input is an error.
    pub fn deserialise(input: &str) -> Result<Self, FormatError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::today());
        }
        let mut parts = trimmed.splitn(3, '-');
        let year = parts.next().and_then(|p| p.parse::<i32>().ok());
        let month = parts.next().and_then(|p| p.parse::<u32>().ok());
        let day = parts.next().and_then(|p| p.parse::<u32>().ok());
        match (year, month, day) {
            (Some(y), Some(m), Some(d)) => Self::new(y, m, d),
            _ => Err(FormatError::InvalidDate(trimmed.to_string())),
        }
    }

    /// Display form `DD/MM/YYYY`, as shown in the item lists.
    pub fn format(self) -> String {
        format!("{}/{}/{}", self.day, self.month, self.year)
    }
}

impl fmt::Display for Ymd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialise())
    }
}

impl FromStr for Ymd {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialise(s)
    }
}
