//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HomeError`]
//! via `#[from]` (no `String` variants).

use std::ops::RangeInclusive;

/// Base error for every homesim operation.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    /// A setting value was outside the accepted bounds.
    #[error("invalid setting")]
    InvalidRange(#[from] RangeError),

    /// A device or menu index did not match anything.
    #[error("index out of range")]
    OutOfRange(#[from] OutOfRangeError),

    /// The device has no adjustable setting.
    #[error("unsupported operation")]
    Unsupported(#[from] UnsupportedError),

    /// The action log storage could not be opened, read or written.
    #[error("action log unavailable")]
    LogUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HomeError {
    /// Message suitable for showing to a user: the detailed source message
    /// for domain errors, the top-level message for storage errors.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRange(err) => err.to_string(),
            Self::OutOfRange(err) => err.to_string(),
            Self::Unsupported(err) => err.to_string(),
            Self::LogUnavailable(err) => format!("action log unavailable: {err}"),
        }
    }
}

/// A setting value fell outside its inclusive bounds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid {setting} {value}: must be between {min} and {max}",
    min = .range.start(),
    max = .range.end()
)]
pub struct RangeError {
    /// Human label of the setting (`brightness`, `speed`, `temperature`).
    pub setting: &'static str,
    pub value: i64,
    pub range: RangeInclusive<i64>,
}

/// A 1-based index did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {what} number {index}: expected 1 to {len}")]
pub struct OutOfRangeError {
    /// What the index was meant to select (`device`, `action`, …).
    pub what: &'static str,
    pub index: usize,
    pub len: usize,
}

/// The operation is not supported by this kind of device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{device} has no adjustable settings")]
pub struct UnsupportedError {
    pub device: String,
}
