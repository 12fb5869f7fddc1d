/// Months in a calendar year
pub const MONTHS_PER_YEAR: i32 = 12;
/// Days in a calendar week
pub const DAYS_PER_WEEK: i64 = 7;

/// Number of calendar panels a picker shows side by side
pub const CALENDAR_PANELS: usize = 2;

/// Default caption format for a committed range (`DD MMM YYYY`)
pub const DEFAULT_DISPLAY_FORMAT: &str = "%d %b %Y";
/// Joins start and end in a range caption
pub const SUMMARY_SEPARATOR: &str = " - ";

/// Range separator (ISO 8601 time interval)
pub const RANGE_SEPARATOR: char = '/';
/// Marks an open (absent) interval boundary
pub const OPEN_BOUNDARY: &str = "..";
/// Year and month separator in a month anchor
pub const MONTH_SEPARATOR: char = '-';

/// Default distance, in years, a selectable day may lie from today
pub const DEFAULT_SELECTABLE_YEARS: u32 = 1;

/// Label of the start panel when no start is chosen
pub const START_PANEL_LABEL: &str = "Start Date";
/// Label of the end panel when no end is chosen
pub const END_PANEL_LABEL: &str = "End Date";
/// Panel header format for a chosen boundary (`DD MMMM YYYY`)
pub const HEADER_DATE_FORMAT: &str = "%d %B %Y";
