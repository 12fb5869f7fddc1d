use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::consts::{
    CALENDAR_PANELS, END_PANEL_LABEL, HEADER_DATE_FORMAT, MONTH_SEPARATOR, START_PANEL_LABEL,
};
use crate::{Constraint, DateRange, RangeError, prelude::*};

/// A calendar month, anchored on its first day.
/// Always a valid month inside the `NaiveDate` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthAnchor(NaiveDate);

impl MonthAnchor {
    /// Creates a month anchor, validating the month and the year range
    ///
    /// # Errors
    /// Returns `RangeError::InvalidMonth` if `month` is outside `1..=12` or the
    /// year cannot be represented.
    pub fn new(year: i32, month: u32) -> Result<Self, RangeError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or(RangeError::InvalidMonth { year, month })
    }

    /// Returns the month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        // day 1 of an existing date's month always exists
        Self(date.with_day(1).unwrap_or(date))
    }

    #[inline]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[inline]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// First day of the month
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Last day of the month
    pub fn last_day(self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|day| day.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Moves by `months`, saturating at the ends of the calendar
    pub fn offset(self, months: i32) -> Self {
        Self::of(shift_months(self.0, months))
    }

    pub fn succ(self) -> Self {
        self.offset(1)
    }

    pub fn pred(self) -> Self {
        self.offset(-1)
    }

    /// Checks if `date` falls inside this month
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }
}

impl fmt::Display for MonthAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{MONTH_SEPARATOR}{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthAnchor {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // rsplit keeps a leading minus sign with the year
        let (year, month) = trimmed
            .rsplit_once(MONTH_SEPARATOR)
            .ok_or_else(|| RangeError::InvalidFormat(format!("Expected YYYY-MM, got: {s}")))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| RangeError::InvalidFormat(format!("Invalid year in: {s}")))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| RangeError::InvalidFormat(format!("Invalid month in: {s}")))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthAnchor {
    type Error = RangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthAnchor> for String {
    fn from(anchor: MonthAnchor) -> Self {
        anchor.to_string()
    }
}

impl From<NaiveDate> for MonthAnchor {
    fn from(date: NaiveDate) -> Self {
        Self::of(date)
    }
}

/// One of the two calendar panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Panel {
    #[display(fmt = "{}", START_PANEL_LABEL)]
    Start,
    #[display(fmt = "{}", END_PANEL_LABEL)]
    End,
}

impl Panel {
    /// Header text for this panel: the chosen boundary, or the panel label
    pub fn header(self, range: &DateRange) -> String {
        let boundary = match self {
            Self::Start => range.start(),
            Self::End => range.end(),
        };
        boundary.map_or_else(
            || self.to_string(),
            |day| day.format(HEADER_DATE_FORMAT).to_string(),
        )
    }
}

/// Direction of a month navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Step {
    #[display(fmt = "previous")]
    Previous,
    #[display(fmt = "next")]
    Next,
}

/// The pair of months shown in the calendar panels, start panel first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleMonths {
    first:  MonthAnchor,
    second: MonthAnchor,
}

impl VisibleMonths {
    pub const fn new(first: MonthAnchor, second: MonthAnchor) -> Self {
        Self { first, second }
    }

    /// `month` and the one after it
    pub fn following(month: MonthAnchor) -> Self {
        Self::new(month, month.succ())
    }

    /// The month before `month`, and `month`
    pub fn preceding(month: MonthAnchor) -> Self {
        Self::new(month.pred(), month)
    }

    pub const fn first(&self) -> MonthAnchor {
        self.first
    }

    pub const fn second(&self) -> MonthAnchor {
        self.second
    }

    pub const fn get(&self, panel: Panel) -> MonthAnchor {
        match panel {
            Panel::Start => self.first,
            Panel::End => self.second,
        }
    }

    pub const fn months(&self) -> [MonthAnchor; CALENDAR_PANELS] {
        [self.first, self.second]
    }

    /// Checks if `panel` may move one month in `step` direction.
    /// Future months are locked once a panel reaches today's month when
    /// `disable_future` is set, and past months likewise for `disable_past`.
    pub fn can_step(&self, panel: Panel, step: Step, constraint: Constraint, today: NaiveDate) -> bool {
        let month = self.get(panel);
        let current = MonthAnchor::of(today);
        match step {
            Step::Next => !(constraint.disable_future && month >= current),
            Step::Previous => !(constraint.disable_past && month <= current),
        }
    }

    /// Moves `panel` one month, or returns `self` unchanged if the step is blocked
    pub fn step(self, panel: Panel, step: Step, constraint: Constraint, today: NaiveDate) -> Self {
        if !self.can_step(panel, step, constraint, today) {
            return self;
        }
        let delta = match step {
            Step::Next => 1,
            Step::Previous => -1,
        };
        match panel {
            Panel::Start => Self::new(self.first.offset(delta), self.second),
            Panel::End => Self::new(self.first, self.second.offset(delta)),
        }
    }
}

impl fmt::Display for VisibleMonths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.first, self.second)
    }
}

// Helper functions

/// Adds `days` to `date`, saturating at `NaiveDate::MIN`/`MAX`
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let limit = if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(limit)
}

/// Adds calendar months to `date`, clamping the day to the target month's
/// length and saturating at `NaiveDate::MIN`/`MAX`
pub(crate) fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let magnitude = Months::new(months.unsigned_abs());
    if months < 0 {
        date.checked_sub_months(magnitude).unwrap_or(NaiveDate::MIN)
    } else {
        date.checked_add_months(magnitude).unwrap_or(NaiveDate::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, month};

    #[test]
    fn test_month_anchor_new_valid() {
        for m in 1..=12 {
            assert!(MonthAnchor::new(2024, m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_anchor_new_invalid() {
        assert!(matches!(
            MonthAnchor::new(2024, 0),
            Err(RangeError::InvalidMonth { year: 2024, month: 0 })
        ));
        assert!(matches!(
            MonthAnchor::new(2024, 13),
            Err(RangeError::InvalidMonth { year: 2024, month: 13 })
        ));
    }

    #[test]
    fn test_month_anchor_of() {
        let anchor = MonthAnchor::of(date(2024, 6, 20));
        assert_eq!(anchor.year(), 2024);
        assert_eq!(anchor.month(), 6);
        assert_eq!(anchor.first_day(), date(2024, 6, 1));
    }

    #[test]
    fn test_month_anchor_last_day() {
        struct TestCase {
            year:     i32,
            month:    u32,
            last_day: u32,
        }

        let cases = [
            TestCase { year: 2024, month: 1, last_day: 31 },
            TestCase { year: 2024, month: 2, last_day: 29 },
            TestCase { year: 2023, month: 2, last_day: 28 },
            TestCase { year: 2024, month: 4, last_day: 30 },
            TestCase { year: 2024, month: 12, last_day: 31 },
        ];

        for case in &cases {
            assert_eq!(
                month(case.year, case.month).last_day(),
                date(case.year, case.month, case.last_day),
                "{}-{:02} should end on day {}",
                case.year,
                case.month,
                case.last_day
            );
        }
    }

    #[test]
    fn test_month_anchor_succ_pred_cross_year() {
        assert_eq!(month(2024, 12).succ(), month(2025, 1));
        assert_eq!(month(2024, 1).pred(), month(2023, 12));
        assert_eq!(month(2024, 6).offset(-18), month(2022, 12));
    }

    #[test]
    fn test_month_anchor_offset_saturates() {
        let last = MonthAnchor::of(NaiveDate::MAX);
        assert_eq!(last.succ(), last);
        let first = MonthAnchor::of(NaiveDate::MIN);
        assert_eq!(first.pred(), first);
    }

    #[test]
    fn test_month_anchor_last_day_at_calendar_end() {
        assert_eq!(MonthAnchor::of(NaiveDate::MAX).last_day(), NaiveDate::MAX);
        assert_eq!(month(2024, 2).last_day().succ_opt(), Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_month_anchor_contains() {
        let june = month(2024, 6);
        assert!(june.contains(date(2024, 6, 1)));
        assert!(june.contains(date(2024, 6, 30)));
        assert!(!june.contains(date(2024, 7, 1)));
        assert_eq!(MonthAnchor::from(date(2024, 6, 20)), june);
    }

    #[test]
    fn test_month_anchor_ordering() {
        assert!(month(2023, 12) < month(2024, 1));
        assert!(month(2024, 2) > month(2024, 1));
    }

    #[test]
    fn test_month_anchor_display_and_parse() {
        let anchor = month(2024, 6);
        assert_eq!(anchor.to_string(), "2024-06");
        assert_eq!("2024-06".parse::<MonthAnchor>().expect("valid anchor"), anchor);
        assert_eq!(" 2024-6 ".parse::<MonthAnchor>().expect("valid anchor"), anchor);
    }

    #[test]
    fn test_month_anchor_parse_invalid() {
        assert!(matches!("202406".parse::<MonthAnchor>(), Err(RangeError::InvalidFormat(_))));
        assert!(matches!("2024-xx".parse::<MonthAnchor>(), Err(RangeError::InvalidFormat(_))));
        assert!(matches!(
            "2024-13".parse::<MonthAnchor>(),
            Err(RangeError::InvalidMonth { month: 13, .. })
        ));
    }

    #[test]
    fn test_month_anchor_serde() {
        let anchor = month(2024, 6);
        let json = serde_json::to_string(&anchor).expect("serialize anchor");
        assert_eq!(json, r#""2024-06""#);

        let parsed: MonthAnchor = serde_json::from_str(&json).expect("deserialize anchor");
        assert_eq!(parsed, anchor);

        assert!(serde_json::from_str::<MonthAnchor>(r#""2024-00""#).is_err());
    }

    #[test]
    fn test_visible_months_constructors() {
        let june = month(2024, 6);
        assert_eq!(VisibleMonths::following(june).months(), [june, month(2024, 7)]);
        assert_eq!(VisibleMonths::preceding(june).months(), [month(2024, 5), june]);
    }

    #[test]
    fn test_step_unconstrained() {
        let today = date(2024, 6, 20);
        let visible = VisibleMonths::following(month(2024, 6));
        let moved = visible.step(Panel::End, Step::Next, Constraint::NONE, today);
        assert_eq!(moved.months(), [month(2024, 6), month(2024, 8)]);

        let moved = visible.step(Panel::Start, Step::Previous, Constraint::NONE, today);
        assert_eq!(moved.months(), [month(2024, 5), month(2024, 7)]);
    }

    #[test]
    fn test_step_blocked_by_disable_future() {
        let today = date(2024, 6, 20);
        let constraint = Constraint::new(false, true);
        let visible = VisibleMonths::preceding(month(2024, 6));

        assert!(visible.can_step(Panel::Start, Step::Next, constraint, today));
        assert!(!visible.can_step(Panel::End, Step::Next, constraint, today));
        assert_eq!(visible.step(Panel::End, Step::Next, constraint, today), visible);
        assert!(visible.can_step(Panel::End, Step::Previous, constraint, today));
    }

    #[test]
    fn test_step_blocked_by_disable_past() {
        let today = date(2024, 6, 20);
        let constraint = Constraint::new(true, false);
        let visible = VisibleMonths::following(month(2024, 6));

        assert!(!visible.can_step(Panel::Start, Step::Previous, constraint, today));
        assert_eq!(visible.step(Panel::Start, Step::Previous, constraint, today), visible);
        assert!(visible.can_step(Panel::End, Step::Previous, constraint, today));
        assert!(visible.can_step(Panel::Start, Step::Next, constraint, today));
    }

    #[test]
    fn test_panel_header() {
        let range = DateRange::starting(date(2024, 6, 5));
        assert_eq!(Panel::Start.header(&range), "05 June 2024");
        assert_eq!(Panel::End.header(&range), "End Date");
        assert_eq!(Panel::Start.header(&DateRange::empty()), "Start Date");
    }

    #[test]
    fn test_shift_days_saturates() {
        assert_eq!(shift_days(date(2024, 6, 20), -7), date(2024, 6, 13));
        assert_eq!(shift_days(date(2024, 6, 20), 11), date(2024, 7, 1));
        assert_eq!(shift_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(shift_days(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(shift_days(date(2024, 6, 20), i64::MAX), NaiveDate::MAX);
    }

    #[test]
    fn test_shift_months_clamps_day() {
        assert_eq!(shift_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_months(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(shift_months(date(2024, 2, 29), 12), date(2025, 2, 28));
    }
}
