//! Log-file-specific error type wrapping I/O errors.

use std::path::PathBuf;

use homesim_domain::error::HomeError;

/// Errors originating from the action log file.
#[derive(Debug, thiserror::Error)]
pub enum LogFileError {
    /// The file (or its parent directory) could not be opened or created.
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entry could not be written.
    #[error("cannot write to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Existing content could not be read.
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be truncated.
    #[error("cannot clear {}", path.display())]
    Truncate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<LogFileError> for HomeError {
    fn from(err: LogFileError) -> Self {
        Self::LogUnavailable(Box::new(err))
    }
}
