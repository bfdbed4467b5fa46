//! Device — a simulated home device with a power state and a kind-specific
//! setting.
//!
//! Every rule about how a device reacts to `toggle` and `adjust_setting`
//! lives here, one `match` arm per [`Kind`]. Adjusting a light or a fan
//! switches it on; adjusting a thermostat never touches its power state;
//! cameras have nothing to adjust.

mod kind;
mod speed;

pub use kind::Kind;
pub use speed::FanSpeed;

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{HomeError, RangeError, UnsupportedError};
use crate::report::{Report, Tone};

/// Brightness a light starts with before it is ever switched on.
pub const DEFAULT_BRIGHTNESS: i64 = 50;
/// Brightness applied when a light is toggled on.
pub const TOGGLE_ON_BRIGHTNESS: i64 = 65;
/// Accepted brightness values, in percent.
pub const BRIGHTNESS_RANGE: RangeInclusive<i64> = 0..=100;
/// Accepted fan speed levels (`0` is off).
pub const SPEED_RANGE: RangeInclusive<i64> = 0..=3;
/// Temperature a thermostat starts with, in °C.
pub const DEFAULT_TEMPERATURE: i64 = 22;
/// Accepted thermostat temperatures, in °C.
pub const TEMPERATURE_RANGE: RangeInclusive<i64> = 16..=30;

/// Kind-specific state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Settings {
    Light { brightness: i64 },
    Fan { speed: FanSpeed },
    Camera,
    Thermostat { temperature: i64 },
}

impl Settings {
    fn initial(kind: Kind) -> Self {
        match kind {
            Kind::Light => Self::Light {
                brightness: DEFAULT_BRIGHTNESS,
            },
            Kind::Fan => Self::Fan {
                speed: FanSpeed::Off,
            },
            Kind::Camera => Self::Camera,
            Kind::Thermostat => Self::Thermostat {
                temperature: DEFAULT_TEMPERATURE,
            },
        }
    }

    fn kind(&self) -> Kind {
        match self {
            Self::Light { .. } => Kind::Light,
            Self::Fan { .. } => Kind::Fan,
            Self::Camera => Kind::Camera,
            Self::Thermostat { .. } => Kind::Thermostat,
        }
    }
}

/// The adjustable setting of a device: what it is called and which values
/// `adjust_setting` accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRange {
    pub label: &'static str,
    pub range: RangeInclusive<i64>,
}

/// A simulated device. Devices start switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    name: String,
    is_on: bool,
    #[serde(flatten)]
    settings: Settings,
}

impl Device {
    /// Create a device of the given kind with its default settings.
    #[must_use]
    pub fn new(kind: Kind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_on: false,
            settings: Settings::initial(kind),
        }
    }

    #[must_use]
    pub fn light(name: impl Into<String>) -> Self {
        Self::new(Kind::Light, name)
    }

    #[must_use]
    pub fn fan(name: impl Into<String>) -> Self {
        Self::new(Kind::Fan, name)
    }

    #[must_use]
    pub fn camera(name: impl Into<String>) -> Self {
        Self::new(Kind::Camera, name)
    }

    #[must_use]
    pub fn thermostat(name: impl Into<String>) -> Self {
        Self::new(Kind::Thermostat, name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current power state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.settings.kind()
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// The setting `adjust_setting` acts on, or `None` for kinds without one.
    #[must_use]
    pub fn setting_range(&self) -> Option<SettingRange> {
        match self.settings {
            Settings::Light { .. } => Some(SettingRange {
                label: "brightness",
                range: BRIGHTNESS_RANGE,
            }),
            Settings::Fan { .. } => Some(SettingRange {
                label: "speed",
                range: SPEED_RANGE,
            }),
            Settings::Camera => None,
            Settings::Thermostat { .. } => Some(SettingRange {
                label: "temperature",
                range: TEMPERATURE_RANGE,
            }),
        }
    }

    /// Flip the power state, applying the kind's power-transition rules.
    pub fn toggle(&mut self) -> Report {
        self.is_on = !self.is_on;
        let name = &self.name;
        let is_on = self.is_on;

        let text = match &mut self.settings {
            Settings::Light { brightness } => {
                if is_on {
                    *brightness = TOGGLE_ON_BRIGHTNESS;
                    format!("{name} turned ON with brightness set to {TOGGLE_ON_BRIGHTNESS}%.")
                } else {
                    format!("{name} turned OFF.")
                }
            }
            Settings::Fan { speed } => {
                if is_on {
                    *speed = FanSpeed::Medium;
                    format!("{name} turned ON with speed set to {}.", FanSpeed::Medium)
                } else {
                    *speed = FanSpeed::Off;
                    format!("{name} turned OFF.")
                }
            }
            Settings::Camera => {
                if is_on {
                    format!("{name} started recording.")
                } else {
                    format!("{name} is now idle.")
                }
            }
            Settings::Thermostat { .. } => {
                if is_on {
                    format!("{name} turned ON.")
                } else {
                    format!("{name} turned OFF.")
                }
            }
        };

        Report::line(text, Tone::for_power(is_on))
    }

    /// Change the kind-specific setting.
    ///
    /// A light or fan that is off is switched on by any accepted value other
    /// than fan speed `0`, which switches the fan off.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::InvalidRange`] when `value` is out of bounds and
    /// [`HomeError::Unsupported`] for cameras. The device is left untouched
    /// in both cases.
    pub fn adjust_setting(&mut self, value: i64) -> Result<Report, HomeError> {
        let mut report = Report::default();

        match &mut self.settings {
            Settings::Light { brightness } => {
                check_range("brightness", &BRIGHTNESS_RANGE, value)?;
                if !self.is_on {
                    self.is_on = true;
                    report.push(format!("{} turned ON.", self.name), Tone::Success);
                }
                *brightness = value;
                report.push(
                    format!("{} brightness set to {value}%.", self.name),
                    Tone::Info,
                );
            }
            Settings::Fan { speed } => {
                check_range("speed", &SPEED_RANGE, value)?;
                let requested = FanSpeed::from_level(value).unwrap_or_default();
                if requested == FanSpeed::Off {
                    self.is_on = false;
                } else if !self.is_on {
                    self.is_on = true;
                    report.push(format!("{} turned ON.", self.name), Tone::Success);
                }
                *speed = requested;
                report.push(
                    format!("{} speed set to {requested}.", self.name),
                    Tone::Info,
                );
            }
            Settings::Camera => {
                return Err(UnsupportedError {
                    device: self.name.clone(),
                }
                .into());
            }
            Settings::Thermostat { temperature } => {
                check_range("temperature", &TEMPERATURE_RANGE, value)?;
                *temperature = value;
                report.push(
                    format!("{} temperature set to {value}°C.", self.name),
                    Tone::Info,
                );
            }
        }

        Ok(report)
    }

    /// Describe the current state without changing it.
    #[must_use]
    pub fn show_state(&self) -> Report {
        let name = &self.name;
        let power = if self.is_on { "ON" } else { "OFF" };

        let text = match self.settings {
            Settings::Light { brightness } => {
                format!("{name} is {power} with brightness {brightness}%.")
            }
            Settings::Fan { speed } => format!("{name} is {power} with speed {speed}."),
            Settings::Camera if self.is_on => format!("{name} is recording."),
            Settings::Camera => format!("{name} is idle."),
            Settings::Thermostat { temperature } => {
                format!("{name} is {power} with temperature {temperature}°C.")
            }
        };

        Report::line(text, Tone::for_power(self.is_on))
    }
}

fn check_range(
    setting: &'static str,
    range: &RangeInclusive<i64>,
    value: i64,
) -> Result<(), RangeError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(RangeError {
            setting,
            value,
            range: range.clone(),
        })
    }
}
