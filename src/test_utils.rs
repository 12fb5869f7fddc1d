//! Shorthand constructors for tests.

use chrono::NaiveDate;

use crate::{DateRange, MonthAnchor};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("invalid test date")
}

pub fn month(year: i32, month: u32) -> MonthAnchor {
    MonthAnchor::new(year, month).expect("invalid test month")
}

/// A complete range from `(year, month, day)` tuples
pub fn complete(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
    DateRange::new(
        Some(date(start.0, start.1, start.2)),
        Some(date(end.0, end.1, end.2)),
    )
    .expect("test range out of order")
}
