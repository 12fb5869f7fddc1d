use chrono::NaiveDate;

use crate::DateRange;

/// Decides the next range after the user clicks `day`.
///
/// With no start, or with a complete range, the click starts a new range.
/// Otherwise a day before the start replaces it, and any other day (the
/// start itself included) closes the range.
pub fn select_day(current: DateRange, day: NaiveDate) -> DateRange {
    match (current.start(), current.end()) {
        (Some(start), None) if day >= start => DateRange::between(start, day),
        // a day before an open start keeps the (absent) end
        _ => DateRange::starting(day),
    }
}
