//! Device kind — the closed set of simulated device types.

use serde::{Deserialize, Serialize};

/// The kind of a [`Device`](super::Device).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Light,
    Fan,
    Camera,
    Thermostat,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Fan => f.write_str("fan"),
            Self::Camera => f.write_str("camera"),
            Self::Thermostat => f.write_str("thermostat"),
        }
    }
}
