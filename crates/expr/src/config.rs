//! Engine configuration.
use crate::error::ExprError;
use serde::{Deserialize, Serialize};

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];
const WEEKDAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Settings shared by every resolution pass of an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// How many nested `applyData` passes may run before the value is left as-is.
    pub max_apply_depth: usize,
    /// How deeply modifier calls may nest inside other modifiers' arguments.
    pub max_argument_depth: usize,
    /// Pattern used by `format()`/`dateFormat()` when called without one.
    pub date_format: String,
    /// Joiner for list results substituted into a larger string.
    pub list_separator: String,
    /// Month and weekday names used by the date modifiers.
    pub locale: DateLocale,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_apply_depth: 8,
            max_argument_depth: 32,
            date_format: "F j, Y".to_string(),
            list_separator: ", ".to_string(),
            locale: DateLocale::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document; absent fields keep their defaults.
    pub fn from_json(source: &str) -> Result<Self, ExprError> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Localized names for date formatting. Weekdays start on Sunday.
///
/// Missing entries fall back to English.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateLocale {
    pub months: Vec<String>,
    pub months_short: Vec<String>,
    pub weekdays: Vec<String>,
    pub weekdays_short: Vec<String>,
    pub am: String,
    pub pm: String,
}

impl Default for DateLocale {
    fn default() -> Self {
        fn owned(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }
        Self {
            months: owned(&MONTHS),
            months_short: owned(&MONTHS_SHORT),
            weekdays: owned(&WEEKDAYS),
            weekdays_short: owned(&WEEKDAYS_SHORT),
            am: "am".to_string(),
            pm: "pm".to_string(),
        }
    }
}

impl DateLocale {
    /// `month` is 1-based.
    pub fn month(&self, month: u32, short: bool) -> &str {
        let index = month.saturating_sub(1) as usize % 12;
        let (names, fallback) = if short {
            (&self.months_short, MONTHS_SHORT[index])
        } else {
            (&self.months, MONTHS[index])
        };
        names.get(index).map(String::as_str).unwrap_or(fallback)
    }

    /// `weekday` counts days from Sunday (0-6).
    pub fn weekday(&self, weekday: u32, short: bool) -> &str {
        let index = weekday as usize % 7;
        let (names, fallback) = if short {
            (&self.weekdays_short, WEEKDAYS_SHORT[index])
        } else {
            (&self.weekdays, WEEKDAYS[index])
        };
        names.get(index).map(String::as_str).unwrap_or(fallback)
    }

    pub fn meridiem(&self, pm: bool) -> &str {
        if pm { &self.pm } else { &self.am }
    }
}
