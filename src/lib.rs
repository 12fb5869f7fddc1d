//! Selection logic behind a two-panel date range picker.
//!
//! The engine is a set of pure functions over [`DateRange`] values:
//!
//! - [`select_day`] turns a day click into the next range,
//! - [`clamp`] pulls a range into the days a [`Constraint`] allows,
//! - [`resolve`] turns a shortcut ([`PresetSpec`]) into a range and the
//!   [`VisibleMonths`] that frame it.
//!
//! None of them read the clock: every call takes `today` explicitly.
//! [`Picker`] layers the dialog state on top: a draft edited while the dialog
//! is open, a committed range published on apply, and a [`SelectionHandle`]
//! for reading the committed range from outside.

mod clamp;
mod config;
mod consts;
mod picker;
mod prelude;
mod preset;
mod range;
mod select;
mod types;

#[cfg(test)]
mod test_utils;

pub use clamp::{Constraint, clamp};
pub use config::{ConfigError, PickerConfig};
pub use consts::*;
pub use picker::{Picker, PickerError, SelectionHandle};
pub use preset::{
    Adjustment, Preset, PresetParseError, PresetSpec, RangeProvider, Resolution, Shortcut, default_shortcuts,
    initial_months, reset, resolve, resolve_with_week_start, visible_months,
};
pub use range::{DateRange, RangeError};
pub use select::select_day;
pub use types::{MonthAnchor, Panel, Step, VisibleMonths};
