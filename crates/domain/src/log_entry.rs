//! Log entry — one line of the action log.
//!
//! The line format is `"<device>: <action>"`. Entries carry no timestamp;
//! their order in the log is their chronology.

use std::str::FromStr;

use serde::Serialize;

/// Name used for entries not tied to a single device.
pub const SYSTEM: &str = "System";

/// Separator between device name and action.
pub const SEPARATOR: &str = ": ";

/// A `(device, action)` record. The device is referenced by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub device: String,
    pub action: String,
}

impl LogEntry {
    #[must_use]
    pub fn new(device: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            action: action.into(),
        }
    }

    /// `"Toggled ON"` / `"Toggled OFF"` for the resulting power state.
    #[must_use]
    pub fn toggled(device: impl Into<String>, is_on: bool) -> Self {
        let state = if is_on { "ON" } else { "OFF" };
        Self::new(device, format!("Toggled {state}"))
    }

    /// Records the value passed to `adjust_setting`, whether or not it was
    /// accepted.
    #[must_use]
    pub fn adjusted(device: impl Into<String>, value: i64) -> Self {
        Self::new(device, format!("Adjusted setting to {value}"))
    }

    #[must_use]
    pub fn reset_all() -> Self {
        Self::new(SYSTEM, "All devices reset to OFF")
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.device, self.action)
    }
}

/// A log line without the `": "` separator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed log line: {line:?}")]
pub struct ParseLogEntryError {
    pub line: String,
}

impl FromStr for LogEntry {
    type Err = ParseLogEntryError;

    /// Split on the first separator, so actions may themselves contain `": "`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        line.split_once(SEPARATOR)
            .map(|(device, action)| Self::new(device, action))
            .ok_or_else(|| ParseLogEntryError {
                line: line.to_string(),
            })
    }
}
