//! Host-side state for a date range picker.
//!
//! A [`Picker`] keeps the committed range apart from the draft being edited
//! in the open dialog. Edits only reach the committed slot through
//! [`Picker::apply`], which is also the only place the change callback fires
//! for a new selection.

use std::{cell::Cell, fmt, rc::Rc};

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::config::{ConfigError, PickerConfig};
use crate::preset::{self, PresetSpec, Shortcut};
use crate::types::shift_months;
use crate::{Constraint, DateRange, MONTHS_PER_YEAR, Panel, Step, VisibleMonths, select_day};

/// Error type for picker interactions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    /// Apply requested while the draft lacks a boundary.
    #[error("Cannot apply an incomplete range: {0}")]
    IncompleteRange(DateRange),

    /// Interaction that needs the open dialog.
    #[error("Picker is not open")]
    NotOpen,

    /// Shortcut index outside the offered shortcuts.
    #[error("No shortcut at index {0}")]
    UnknownShortcut(usize),
}

/// Read access to the committed range of a [`Picker`].
///
/// Clones share the picker's committed slot and see every later commit.
#[derive(Debug, Clone)]
pub struct SelectionHandle {
    committed: Rc<Cell<DateRange>>,
}

impl SelectionHandle {
    pub fn current_value(&self) -> DateRange {
        self.committed.get()
    }
}

type ChangeCallback = Box<dyn FnMut(DateRange)>;

pub struct Picker {
    config:    PickerConfig,
    shortcuts: Vec<Shortcut>,
    committed: Rc<Cell<DateRange>>,
    draft:     DateRange,
    visible:   VisibleMonths,
    open:      bool,
    on_change: Option<ChangeCallback>,
}

impl Picker {
    /// Creates a picker with nothing selected.
    ///
    /// # Errors
    /// Returns `ConfigError` if `config` does not validate.
    pub fn new(config: PickerConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        Self::controlled(config, DateRange::empty(), today)
    }

    /// Creates a picker whose committed range starts at `value`.
    ///
    /// # Errors
    /// Returns `ConfigError` if `config` does not validate.
    pub fn controlled(config: PickerConfig, value: DateRange, today: NaiveDate) -> Result<Self, ConfigError> {
        config.validate()?;
        let shortcuts = config.presets.iter().copied().map(Shortcut::named).collect();
        let visible = preset::initial_months(&value, config.constraint, today);
        Ok(Self {
            config,
            shortcuts,
            committed: Rc::new(Cell::new(value)),
            draft: value,
            visible,
            open: false,
            on_change: None,
        })
    }

    /// Replaces the offered shortcuts
    #[must_use]
    pub fn with_shortcuts(mut self, shortcuts: Vec<Shortcut>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// Registers the callback notified when the committed range changes
    pub fn on_change(&mut self, callback: impl FnMut(DateRange) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Read handle on the committed slot. Any handle, however early it was
    /// taken, sees every later commit, so hosts may take it right after
    /// construction or whenever they need one.
    pub fn handle(&self) -> SelectionHandle {
        SelectionHandle {
            committed: Rc::clone(&self.committed),
        }
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn constraint(&self) -> Constraint {
        self.config.constraint
    }

    /// Shortcuts to show, empty when presets are switched off
    pub fn shortcuts(&self) -> &[Shortcut] {
        if self.config.show_presets { self.shortcuts.as_slice() } else { &[] }
    }

    pub fn committed(&self) -> DateRange {
        self.committed.get()
    }

    pub const fn draft(&self) -> DateRange {
        self.draft
    }

    pub const fn visible_months(&self) -> VisibleMonths {
        self.visible
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Apply is only offered for a complete draft
    pub const fn can_apply(&self) -> bool {
        self.draft.is_complete()
    }

    /// Caption of the committed range in the configured format
    pub fn summary(&self) -> String {
        self.committed().summary(&self.config.display_format)
    }

    pub fn draft_day_count(&self) -> Option<i64> {
        self.draft.day_count()
    }

    pub fn header(&self, panel: Panel) -> String {
        panel.header(&self.draft)
    }

    /// Checks if `day` may be clicked: permitted by the constraint and within
    /// `selectable_years` of today.
    pub fn is_selectable(&self, day: NaiveDate, today: NaiveDate) -> bool {
        let months = i32::try_from(self.config.selectable_years)
            .unwrap_or(i32::MAX)
            .saturating_mul(MONTHS_PER_YEAR);
        let earliest = shift_months(today, -months);
        let latest = shift_months(today, months);
        self.constraint().permits(day, today) && (earliest..=latest).contains(&day)
    }

    /// Opens the dialog with the committed range as the draft
    pub fn open(&mut self, today: NaiveDate) {
        self.draft = self.committed();
        self.visible = preset::initial_months(&self.draft, self.constraint(), today);
        self.open = true;
        trace!(draft = %self.draft, visible = %self.visible, "picker opened");
    }

    /// Feeds a day click into the draft. Returns whether the click was taken.
    ///
    /// # Errors
    /// Returns `PickerError::NotOpen` if the dialog is closed.
    pub fn click_day(&mut self, day: NaiveDate, today: NaiveDate) -> Result<bool, PickerError> {
        self.ensure_open()?;
        if !self.is_selectable(day, today) {
            debug!(%day, %today, "ignoring click on unselectable day");
            return Ok(false);
        }
        self.draft = select_day(self.draft, day);
        trace!(draft = %self.draft, "day selected");
        Ok(true)
    }

    /// Resolves a shortcut into the draft. A shortcut without a complete
    /// range leaves the draft untouched and returns `false`.
    ///
    /// # Errors
    /// Returns `PickerError::NotOpen` if the dialog is closed.
    pub fn apply_preset(&mut self, spec: &PresetSpec, today: NaiveDate) -> Result<bool, PickerError> {
        self.ensure_open()?;
        let resolution =
            preset::resolve_with_week_start(spec, self.constraint(), today, self.config.week_start);
        let Some(resolution) = resolution else {
            return Ok(false);
        };
        self.draft = resolution.range;
        self.visible = resolution.visible;
        Ok(true)
    }

    /// Applies the offered shortcut at `index`, see [`Picker::apply_preset`].
    ///
    /// # Errors
    /// Returns `PickerError::NotOpen` if the dialog is closed, or
    /// `PickerError::UnknownShortcut` if `index` is out of range.
    pub fn apply_shortcut(&mut self, index: usize, today: NaiveDate) -> Result<bool, PickerError> {
        self.ensure_open()?;
        let spec = self
            .shortcuts()
            .get(index)
            .map(|shortcut| shortcut.spec.clone())
            .ok_or(PickerError::UnknownShortcut(index))?;
        self.apply_preset(&spec, today)
    }

    /// Moves one panel by a month. Returns whether it moved.
    ///
    /// # Errors
    /// Returns `PickerError::NotOpen` if the dialog is closed.
    pub fn navigate(&mut self, panel: Panel, step: Step, today: NaiveDate) -> Result<bool, PickerError> {
        self.ensure_open()?;
        if !self.visible.can_step(panel, step, self.constraint(), today) {
            debug!(?panel, %step, "month navigation blocked");
            return Ok(false);
        }
        self.visible = self.visible.step(panel, step, self.constraint(), today);
        Ok(true)
    }

    /// Clears the draft and shows the months around today
    ///
    /// # Errors
    /// Returns `PickerError::NotOpen` if the dialog is closed.
    pub fn reset(&mut self, today: NaiveDate) -> Result<(), PickerError> {
        self.ensure_open()?;
        let resolution = preset::reset(self.constraint(), today);
        self.draft = resolution.range;
        self.visible = resolution.visible;
        Ok(())
    }

    /// Commits the draft and closes the dialog. Notifies the change callback
    /// if the committed range changed.
    ///
    /// # Errors
    /// Returns `PickerError::NotOpen` if the dialog is closed, or
    /// `PickerError::IncompleteRange` if the draft lacks a boundary.
    pub fn apply(&mut self) -> Result<DateRange, PickerError> {
        self.ensure_open()?;
        if !self.draft.is_complete() {
            return Err(PickerError::IncompleteRange(self.draft));
        }
        self.open = false;
        debug!(range = %self.draft, "committing range");
        self.commit(self.draft);
        Ok(self.draft)
    }

    /// Drops the draft and closes the dialog; the committed range stays.
    pub fn discard(&mut self) {
        self.draft = self.committed();
        self.open = false;
        trace!("draft discarded");
    }

    /// Clears both the draft and the committed range and closes the dialog.
    pub fn clear(&mut self) {
        self.draft = DateRange::empty();
        self.open = false;
        debug!("selection cleared");
        self.commit(DateRange::empty());
    }

    /// Replaces the committed range from the host without notification.
    /// A closed dialog also takes it as its draft.
    pub fn sync(&mut self, value: DateRange) {
        self.committed.set(value);
        if !self.open {
            self.draft = value;
        }
    }

    fn commit(&mut self, value: DateRange) {
        let previous = self.committed.replace(value);
        if previous == value {
            return;
        }
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
    }

    const fn ensure_open(&self) -> Result<(), PickerError> {
        if self.open { Ok(()) } else { Err(PickerError::NotOpen) }
    }
}

impl fmt::Debug for Picker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picker")
            .field("config", &self.config)
            .field("committed", &self.committed.get())
            .field("draft", &self.draft)
            .field("visible", &self.visible)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}
