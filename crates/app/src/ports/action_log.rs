//! Action log port — append-only storage of [`LogEntry`] lines.

use homesim_domain::error::HomeError;
use homesim_domain::log_entry::LogEntry;

/// Result of [`ActionLog::clear`] when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// There was nothing to clear.
    AlreadyEmpty,
    /// Existing entries were removed.
    Cleared,
}

/// Persistent, append-only record of control actions.
///
/// Storage failures are reported as [`HomeError::LogUnavailable`]; callers
/// treat them as non-fatal.
pub trait ActionLog {
    /// Append one entry after all existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::LogUnavailable`] if the storage cannot be written.
    fn append(&self, entry: &LogEntry) -> Result<(), HomeError>;

    /// Every stored line, oldest first. Missing storage reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::LogUnavailable`] if existing storage cannot be read.
    fn read_all(&self) -> Result<Vec<String>, HomeError>;

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::LogUnavailable`] if the storage cannot be truncated.
    fn clear(&self) -> Result<ClearOutcome, HomeError>;
}
