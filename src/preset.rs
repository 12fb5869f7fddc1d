use std::{fmt, rc::Rc, str::FromStr};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::types::{shift_days, shift_months};
use crate::{
    Constraint, DAYS_PER_WEEK, DateRange, MONTHS_PER_YEAR, MonthAnchor, VisibleMonths, clamp, prelude::*,
};

/// Built-in shortcut rules, displayed by their button label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Preset {
    #[display(fmt = "Today")]
    Today,
    #[display(fmt = "One Day")]
    OneDay,
    #[display(fmt = "One Week")]
    OneWeek,
    #[display(fmt = "One Month")]
    OneMonth,
    #[display(fmt = "One Year")]
    OneYear,
    #[display(fmt = "Current Month")]
    CurrentMonth,
    #[display(fmt = "Current Week")]
    CurrentWeek,
}

/// Error returned when a label names no built-in preset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown preset: {0}")]
pub struct PresetParseError(pub String);

/// Distance from today covered by an offset preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offset {
    Days(i64),
    Months(i32),
}

impl Offset {
    fn forward(self, day: NaiveDate) -> NaiveDate {
        match self {
            Self::Days(n) => shift_days(day, n),
            Self::Months(n) => shift_months(day, n),
        }
    }

    fn backward(self, day: NaiveDate) -> NaiveDate {
        match self {
            Self::Days(n) => shift_days(day, -n),
            Self::Months(n) => shift_months(day, -n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// `[today, today + offset]`, re-anchored on today under a constraint
    Offset(Offset),
    /// The calendar month containing today, clamped under a constraint
    Month,
    /// The calendar week containing today, clamped under a constraint
    Week,
}

impl Preset {
    pub const ALL: [Self; 7] = [
        Self::Today,
        Self::OneDay,
        Self::OneWeek,
        Self::OneMonth,
        Self::OneYear,
        Self::CurrentMonth,
        Self::CurrentWeek,
    ];

    const fn rule(self) -> Rule {
        match self {
            Self::Today => Rule::Offset(Offset::Days(0)),
            Self::OneDay => Rule::Offset(Offset::Days(1)),
            Self::OneWeek => Rule::Offset(Offset::Days(DAYS_PER_WEEK)),
            Self::OneMonth => Rule::Offset(Offset::Months(1)),
            Self::OneYear => Rule::Offset(Offset::Months(MONTHS_PER_YEAR)),
            Self::CurrentMonth => Rule::Month,
            Self::CurrentWeek => Rule::Week,
        }
    }
}

impl FromStr for Preset {
    type Err = PresetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.to_string().eq_ignore_ascii_case(label))
            .ok_or_else(|| PresetParseError(label.to_owned()))
    }
}

impl TryFrom<String> for Preset {
    type Error = PresetParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Preset> for String {
    fn from(preset: Preset) -> Self {
        preset.to_string()
    }
}

/// How a constraint reshapes a provider's range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Adjustment {
    /// Keep the range's length and re-anchor it on today
    #[default]
    PreserveDuration,
    /// Clamp each boundary, like the calendar presets
    Clamp,
}

/// A caller-supplied range factory behind a custom shortcut.
#[derive(Clone)]
pub struct RangeProvider {
    produce:    Rc<dyn Fn() -> DateRange>,
    adjustment: Adjustment,
}

impl RangeProvider {
    /// A provider whose range keeps its length under a constraint
    pub fn new(produce: impl Fn() -> DateRange + 'static) -> Self {
        Self {
            produce:    Rc::new(produce),
            adjustment: Adjustment::PreserveDuration,
        }
    }

    /// A provider whose range is clamped under a constraint
    pub fn clamped(produce: impl Fn() -> DateRange + 'static) -> Self {
        Self {
            produce:    Rc::new(produce),
            adjustment: Adjustment::Clamp,
        }
    }

    pub const fn adjustment(&self) -> Adjustment {
        self.adjustment
    }

    pub fn produce(&self) -> DateRange {
        (self.produce)()
    }
}

impl fmt::Debug for RangeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeProvider")
            .field("adjustment", &self.adjustment)
            .finish_non_exhaustive()
    }
}

/// What a shortcut resolves: a built-in rule or a custom provider.
#[derive(Debug, Clone, From)]
pub enum PresetSpec {
    Named(Preset),
    Provider(RangeProvider),
}

/// A labelled shortcut button.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub label: String,
    pub spec:  PresetSpec,
}

impl Shortcut {
    /// A built-in preset, labelled with its own name
    pub fn named(preset: Preset) -> Self {
        Self {
            label: preset.to_string(),
            spec:  preset.into(),
        }
    }

    pub fn custom(label: impl Into<String>, provider: RangeProvider) -> Self {
        Self {
            label: label.into(),
            spec:  provider.into(),
        }
    }
}

/// The shortcuts offered when the host supplies none: every built-in preset.
pub fn default_shortcuts() -> Vec<Shortcut> {
    Preset::ALL.into_iter().map(Shortcut::named).collect()
}

/// A resolved range and the months the calendar should show for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub range:   DateRange,
    pub visible: VisibleMonths,
}

/// Resolves `spec` against `today` with weeks starting on Monday.
///
/// Returns `None` when the candidate range is missing a boundary; the caller
/// must then leave its state untouched and skip change notification.
pub fn resolve(spec: &PresetSpec, constraints: Constraint, today: NaiveDate) -> Option<Resolution> {
    resolve_with_week_start(spec, constraints, today, Weekday::Mon)
}

/// Like [`resolve`], with an explicit first day of the week for "Current Week".
pub fn resolve_with_week_start(
    spec: &PresetSpec,
    constraints: Constraint,
    today: NaiveDate,
    week_start: Weekday,
) -> Option<Resolution> {
    let Some((start, end)) = candidate(spec, today, week_start).bounds() else {
        debug!(?spec, "preset produced an incomplete range, ignoring");
        return None;
    };

    let range = if constraints.is_pinned() {
        DateRange::single(today)
    } else {
        match spec {
            PresetSpec::Named(preset) => match preset.rule() {
                Rule::Offset(offset) => anchor_offset(start, end, offset, constraints, today),
                Rule::Month | Rule::Week => clamp(DateRange::between(start, end), constraints, today),
            },
            PresetSpec::Provider(provider) => match provider.adjustment() {
                Adjustment::PreserveDuration => {
                    let span = Offset::Days((end - start).num_days());
                    anchor_offset(start, end, span, constraints, today)
                },
                Adjustment::Clamp => clamp(DateRange::between(start, end), constraints, today),
            },
        }
    };

    let visible = match range.bounds() {
        Some((start, end)) => visible_months(start, end, constraints, today),
        None => reset(constraints, today).visible,
    };
    trace!(%range, %visible, "preset resolved");
    Some(Resolution { range, visible })
}

/// The raw range a spec describes, before any constraint is applied
fn candidate(spec: &PresetSpec, today: NaiveDate, week_start: Weekday) -> DateRange {
    match spec {
        PresetSpec::Named(preset) => match preset.rule() {
            Rule::Offset(offset) => DateRange::between(today, offset.forward(today)),
            Rule::Month => {
                let month = MonthAnchor::of(today);
                DateRange::between(month.first_day(), month.last_day())
            },
            Rule::Week => {
                let into_week = (today.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
                let first = shift_days(today, -i64::from(into_week));
                DateRange::between(first, shift_days(first, DAYS_PER_WEEK - 1))
            },
        },
        PresetSpec::Provider(provider) => provider.produce(),
    }
}

/// Re-anchors a range on today so it keeps the distance `offset` describes.
/// `disable_future` ends the range today, `disable_past` starts it today.
fn anchor_offset(
    start: NaiveDate,
    end: NaiveDate,
    offset: Offset,
    constraints: Constraint,
    today: NaiveDate,
) -> DateRange {
    if constraints.disable_future {
        DateRange::between(offset.backward(today), today)
    } else if constraints.disable_past {
        DateRange::between(today, offset.forward(today))
    } else {
        DateRange::between(start, end)
    }
}

/// Months to show for a complete range.
///
/// A backward-looking range ending today under `disable_future` shows the
/// previous and current month. Otherwise a single-month range shows that
/// month and the next, and a longer one shows its first and last month.
pub fn visible_months(start: NaiveDate, end: NaiveDate, constraints: Constraint, today: NaiveDate) -> VisibleMonths {
    let first = MonthAnchor::of(start);
    let last = MonthAnchor::of(end);
    if constraints.disable_future && end == today {
        VisibleMonths::preceding(last)
    } else if first == last {
        VisibleMonths::following(first)
    } else {
        VisibleMonths::new(first, last)
    }
}

/// Clears the selection and shows the months around today.
pub fn reset(constraints: Constraint, today: NaiveDate) -> Resolution {
    let current = MonthAnchor::of(today);
    let visible = if constraints.disable_future {
        VisibleMonths::preceding(current)
    } else {
        VisibleMonths::following(current)
    };
    Resolution {
        range: DateRange::empty(),
        visible,
    }
}

/// Months to show when the picker opens on `range`
pub fn initial_months(range: &DateRange, constraints: Constraint, today: NaiveDate) -> VisibleMonths {
    range.bounds().map_or_else(
        || reset(constraints, today).visible,
        |(start, end)| visible_months(start, end, constraints, today),
    )
}
