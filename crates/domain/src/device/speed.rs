//! Fan speed — the discrete setting of a fan.

use serde::Serialize;

/// Discrete fan speed. A fan that is off always reports [`Off`](Self::Off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FanSpeed {
    #[default]
    Off,
    Low,
    Medium,
    Full,
}

impl FanSpeed {
    /// Map a numeric level (`0..=3`) to a speed.
    #[must_use]
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::Full),
            _ => None,
        }
    }
}

impl std::fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => f.write_str("Off"),
            Self::Low => f.write_str("Low"),
            Self::Medium => f.write_str("Medium"),
            Self::Full => f.write_str("Full"),
        }
    }
}
