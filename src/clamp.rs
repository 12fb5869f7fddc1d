use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DateRange;

/// Restricts selectable days relative to a reference "today".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraint {
    /// Days before today cannot be selected
    pub disable_past:   bool,
    /// Days after today cannot be selected
    pub disable_future: bool,
}

impl Constraint {
    /// No restriction
    pub const NONE: Self = Self::new(false, false);

    pub const fn new(disable_past: bool, disable_future: bool) -> Self {
        Self {
            disable_past,
            disable_future,
        }
    }

    /// Both flags set: only today is selectable
    pub const fn is_pinned(&self) -> bool {
        self.disable_past && self.disable_future
    }

    /// Checks if `day` is selectable under this constraint
    pub fn permits(&self, day: NaiveDate, today: NaiveDate) -> bool {
        !(self.disable_past && day < today) && !(self.disable_future && day > today)
    }

    /// Moves a single boundary into the permitted window
    fn clamp_day(self, day: NaiveDate, today: NaiveDate) -> NaiveDate {
        let day = if self.disable_future { day.min(today) } else { day };
        if self.disable_past { day.max(today) } else { day }
    }
}

/// Pulls each present boundary of `range` into the window `constraints`
/// allows around `today`. Absent boundaries stay absent.
///
/// The result is always ordered and clamping it again changes nothing.
pub fn clamp(range: DateRange, constraints: Constraint, today: NaiveDate) -> DateRange {
    let start = range.start().map(|day| constraints.clamp_day(day, today));
    let end = range.end().map(|day| constraints.clamp_day(day, today));
    DateRange::ordered(start, end)
}
