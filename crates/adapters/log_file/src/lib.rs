//! # homesim-adapter-log-file
//!
//! Plain-text implementation of the [`ActionLog`] port.
//!
//! One entry per line, `"<device>: <action>"`, newline terminated, no header.
//! The file is opened for each operation and closed before it returns, so no
//! handle outlives a call. Concurrent writers on the same path are not
//! supported.
//!
//! ## Dependency rule
//!
//! Depends on `homesim-app` (port traits) and `homesim-domain` only.

mod error;

pub use error::LogFileError;

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use homesim_app::ports::{ActionLog, ClearOutcome};
use homesim_domain::error::HomeError;
use homesim_domain::log_entry::LogEntry;

/// File used when no path is configured.
pub const DEFAULT_PATH: &str = "smart_home_log.txt";

/// Action log stored in a text file.
#[derive(Debug, Clone)]
pub struct FileActionLog {
    path: PathBuf,
}

impl Default for FileActionLog {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl FileActionLog {
    /// Log to `path`. Nothing is touched on disk until the first operation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_append(&self) -> Result<File, LogFileError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LogFileError::Open {
                path: self.path.clone(),
                source,
            })?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LogFileError::Open {
                path: self.path.clone(),
                source,
            })
    }

    fn read_lines(&self) -> Result<Vec<String>, LogFileError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LogFileError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        // Invalid UTF-8 only garbles the lines it appears on.
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn truncate(&self) -> Result<ClearOutcome, LogFileError> {
        let len = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(err) if err.kind() == ErrorKind::NotFound => 0,
            Err(source) => {
                return Err(LogFileError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if len == 0 {
            return Ok(ClearOutcome::AlreadyEmpty);
        }
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|source| LogFileError::Truncate {
                path: self.path.clone(),
                source,
            })?;
        Ok(ClearOutcome::Cleared)
    }
}

impl ActionLog for FileActionLog {
    fn append(&self, entry: &LogEntry) -> Result<(), HomeError> {
        let mut file = self.open_append()?;
        writeln!(file, "{entry}").map_err(|source| LogFileError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::trace!(path = %self.path.display(), %entry, "appended log entry");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<String>, HomeError> {
        Ok(self.read_lines()?)
    }

    fn clear(&self) -> Result<ClearOutcome, HomeError> {
        let outcome = self.truncate()?;
        tracing::debug!(path = %self.path.display(), ?outcome, "cleared log file");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_in(dir: &tempfile::TempDir) -> FileActionLog {
        FileActionLog::new(dir.path().join("smart_home_log.txt"))
    }

    #[test]
    fn should_read_empty_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        assert!(log.read_all().unwrap().is_empty());
        assert!(!log.path().exists());
    }

    #[test]
    fn should_append_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);

        log.append(&LogEntry::toggled("Lamp", true)).unwrap();
        log.append(&LogEntry::adjusted("Lamp", 70)).unwrap();

        assert_eq!(
            log.read_all().unwrap(),
            vec!["Lamp: Toggled ON", "Lamp: Adjusted setting to 70"]
        );
        let raw = fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw, "Lamp: Toggled ON\nLamp: Adjusted setting to 70\n");
    }

    #[test]
    fn should_keep_existing_content_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        log_in(&dir).append(&LogEntry::reset_all()).unwrap();

        let reopened = log_in(&dir);
        reopened.append(&LogEntry::toggled("Fan", false)).unwrap();

        assert_eq!(
            reopened.read_all().unwrap(),
            vec!["System: All devices reset to OFF", "Fan: Toggled OFF"]
        );
    }

    #[test]
    fn should_create_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileActionLog::new(dir.path().join("nested/deeper/log.txt"));
        log.append(&LogEntry::toggled("Cam", true)).unwrap();
        assert_eq!(log.read_all().unwrap(), vec!["Cam: Toggled ON"]);
    }

    #[test]
    fn should_report_already_empty_when_file_missing_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        assert_eq!(log.clear().unwrap(), ClearOutcome::AlreadyEmpty);

        fs::write(log.path(), "").unwrap();
        assert_eq!(log.clear().unwrap(), ClearOutcome::AlreadyEmpty);
    }

    #[test]
    fn should_truncate_when_clearing_non_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.append(&LogEntry::adjusted("Thermostat", 21)).unwrap();

        assert_eq!(log.clear().unwrap(), ClearOutcome::Cleared);
        assert!(log.read_all().unwrap().is_empty());
        assert_eq!(log.clear().unwrap(), ClearOutcome::AlreadyEmpty);
    }

    #[test]
    fn should_return_raw_lines_even_when_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        fs::write(log.path(), "hand written note\nLamp: Toggled ON\n").unwrap();
        assert_eq!(
            log.read_all().unwrap(),
            vec!["hand written note", "Lamp: Toggled ON"]
        );
    }

    #[test]
    fn should_keep_valid_lines_when_file_has_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        fs::write(log.path(), b"Lamp: Toggled ON\nFan: \xff\xfe\nCam: Toggled OFF\n").unwrap();

        let lines = log.read_all().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Lamp: Toggled ON");
        assert!(lines[1].starts_with("Fan: "));
        assert!(lines[1].contains('\u{fffd}'));
        assert_eq!(lines[2], "Cam: Toggled OFF");
    }

    #[test]
    fn should_fail_with_log_unavailable_when_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileActionLog::new(dir.path());
        let result = log.append(&LogEntry::toggled("Lamp", true));
        assert!(matches!(result, Err(HomeError::LogUnavailable(_))));
    }

    #[test]
    fn should_default_to_smart_home_log_file() {
        assert_eq!(
            FileActionLog::default().path(),
            Path::new("smart_home_log.txt")
        );
    }
}
