//! Calendar keys shared by both datasets: the `MM/YYYY` period used by the
//! rain-gauge sheets and the ISO dates accepted from callers.

use crate::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar month of a given year, written `MM/YYYY` everywhere it is
/// exchanged as text.
///
/// Ordering is chronological.
///
/// # Examples
///
/// ```
/// use chuvas::YearMonth;
///
/// let period: YearMonth = "06/2025".parse().unwrap();
/// assert_eq!(period.month(), 6);
/// assert_eq!(period.year(), 2025);
/// assert_eq!(period.to_string(), "06/2025");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside `1..=12` or `year` is not a
    /// four-digit year.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1000..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Strict `MM/YYYY` parsing. Anything else (single-digit months, other
/// separators, trailing text) is rejected.
impl FromStr for YearMonth {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::new("period", s, "expected MM/YYYY");
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[2] != b'/' {
            return Err(invalid());
        }
        let (month, year) = (&s[..2], &s[3..]);
        if !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

/// Parses a caller-supplied `YYYY-MM-DD` date. `field` names the parameter in
/// the resulting [`ValidationError`].
pub fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(ValidationError::new(field, value, "expected YYYY-MM-DD"));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| ValidationError::new(field, value, format!("not a calendar date ({e})")))
}
