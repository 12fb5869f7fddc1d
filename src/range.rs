use std::{
    fmt::{self, Write},
    str::FromStr,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{OPEN_BOUNDARY, RANGE_SEPARATOR, SUMMARY_SEPARATOR};

/// A range of calendar days (inclusive) under construction or complete.
/// Either boundary may be absent. When both are present, start <= end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end:   Option<NaiveDate>,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Month outside 1-12, or a year chrono cannot represent.
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    /// A boundary that is not a valid ISO 8601 calendar date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if both boundaries are present and start > end.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, RangeError> {
        match (start, end) {
            (Some(start), Some(end)) if start > end => Err(RangeError::InvalidRange { start, end }),
            _ => Ok(Self { start, end }),
        }
    }

    /// The range with no boundaries
    pub const fn empty() -> Self {
        Self { start: None, end: None }
    }

    /// A range with only its start chosen
    pub const fn starting(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end:   None,
        }
    }

    /// A complete range covering exactly one day
    pub const fn single(day: NaiveDate) -> Self {
        Self {
            start: Some(day),
            end:   Some(day),
        }
    }

    /// A complete range between two days, in either order
    pub fn between(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: Some(a.min(b)),
            end:   Some(a.max(b)),
        }
    }

    /// Orders two optional boundaries, swapping them if start > end
    pub(crate) fn ordered(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Self::between(start, end),
            (start, end) => Self { start, end },
        }
    }

    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Returns both boundaries if the range is complete
    pub const fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Both boundaries present
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Checks if a complete range contains `day`
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.bounds().is_some_and(|(start, end)| (start..=end).contains(&day))
    }

    /// Number of days covered, counting both ends. `None` unless complete.
    pub fn day_count(&self) -> Option<i64> {
        self.bounds().map(|(start, end)| (end - start).num_days() + 1)
    }

    /// Caption for a complete range, `"<start> - <end>"` rendered with a
    /// chrono `strftime` format. Empty unless the range is complete.
    /// An unusable format yields an empty caption.
    pub fn summary(&self, format: &str) -> String {
        let Some((start, end)) = self.bounds() else {
            return String::new();
        };
        let mut caption = String::new();
        match write!(caption, "{}{SUMMARY_SEPARATOR}{}", start.format(format), end.format(format)) {
            Ok(()) => caption,
            Err(_) => String::new(),
        }
    }

    fn parse_boundary(s: &str) -> Result<Option<NaiveDate>, RangeError> {
        let trimmed = s.trim();

        // ISO 8601 interval: exactly one RANGE_SEPARATOR between start and end
        let Some((start_str, end_str)) = trimmed.split_once(RANGE_SEPARATOR) else {
            return Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            )));
        };

        if end_str.contains(RANGE_SEPARATOR) {
            let separator_count = trimmed.matches(RANGE_SEPARATOR).count();
            return Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            )));
        }

        let start = Self::parse_boundary(start_str)?;
        let end = Self::parse_boundary(end_str)?;

        Self::new(start, end)
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
