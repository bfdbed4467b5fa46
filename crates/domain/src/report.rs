//! Status reports — advisory, human-readable outcome of a device operation.
//!
//! The tone attached to each line is a hint for the presentation layer
//! (colors, icons); it carries no domain meaning.

use serde::Serialize;

/// Presentation hint for a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Something was switched on.
    Success,
    /// Something was switched off or is inactive.
    Alert,
    /// A setting was changed.
    Info,
    /// Nothing happened because the request could not apply.
    Warning,
}

impl Tone {
    /// Tone conventionally used for a power state.
    #[must_use]
    pub fn for_power(is_on: bool) -> Self {
        if is_on { Self::Success } else { Self::Alert }
    }
}

/// One line of a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

/// Ordered status lines produced by a single operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    lines: Vec<StatusLine>,
}

impl Report {
    /// A report holding exactly one line.
    #[must_use]
    pub fn line(text: impl Into<String>, tone: Tone) -> Self {
        let mut report = Self::default();
        report.push(text, tone);
        report
    }

    pub fn push(&mut self, text: impl Into<String>, tone: Tone) {
        self.lines.push(StatusLine {
            text: text.into(),
            tone,
        });
    }

    #[must_use]
    pub fn lines(&self) -> &[StatusLine] {
        &self.lines
    }

    /// Text of the last line, usually the one describing the final state.
    #[must_use]
    pub fn last_text(&self) -> Option<&str> {
        self.lines.last().map(|line| line.text.as_str())
    }
}
