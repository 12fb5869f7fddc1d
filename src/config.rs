use chrono::{
    Weekday,
    format::{Item, StrftimeItems},
};
use serde::{Deserialize, Serialize};

use crate::{Constraint, DEFAULT_DISPLAY_FORMAT, DEFAULT_SELECTABLE_YEARS, Preset};

/// Host-supplied settings for a [`Picker`](crate::Picker).
///
/// Every field has a default, so a partial document deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub constraint:       Constraint,
    /// chrono `strftime` format for the committed range caption
    pub display_format:   String,
    /// First day of the week for "Current Week"
    pub week_start:       Weekday,
    /// How many years either side of today a day may be picked
    pub selectable_years: u32,
    pub show_presets:     bool,
    /// Built-in shortcuts offered when presets are shown
    pub presets:          Vec<Preset>,
}

/// Error type for invalid picker settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid display format: {0}")]
    InvalidDisplayFormat(String),
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            constraint:       Constraint::NONE,
            display_format:   DEFAULT_DISPLAY_FORMAT.to_owned(),
            week_start:       Weekday::Mon,
            selectable_years: DEFAULT_SELECTABLE_YEARS,
            show_presets:     false,
            presets:          Preset::ALL.to_vec(),
        }
    }
}

impl PickerConfig {
    /// # Errors
    /// Returns `ConfigError::InvalidDisplayFormat` if `display_format` holds a
    /// specifier chrono does not understand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.display_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidDisplayFormat(self.display_format.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PickerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.display_format, "%d %b %Y");
        assert_eq!(config.week_start, Weekday::Mon);
        assert_eq!(config.presets.len(), Preset::ALL.len());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{
            "constraint": { "disable_future": true },
            "week_start": "Sun",
            "show_presets": true,
            "presets": ["One Week", "Current Month"]
        }"#;
        let config: PickerConfig = serde_json::from_str(json).expect("failed to deserialize config");

        assert_eq!(config.constraint, Constraint::new(false, true));
        assert_eq!(config.week_start, Weekday::Sun);
        assert!(config.show_presets);
        assert_eq!(config.presets, [Preset::OneWeek, Preset::CurrentMonth]);
        assert_eq!(config.display_format, DEFAULT_DISPLAY_FORMAT);
        assert_eq!(config.selectable_years, DEFAULT_SELECTABLE_YEARS);
    }

    #[test]
    fn test_deserialize_unknown_preset() {
        let result = serde_json::from_str::<PickerConfig>(r#"{ "presets": ["Fortnight"] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_display_format() {
        let config = PickerConfig {
            display_format: "%d %Q".to_owned(),
            ..PickerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDisplayFormat("%d %Q".to_owned()))
        );
    }
}
