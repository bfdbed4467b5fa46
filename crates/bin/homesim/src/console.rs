//! Terminal I/O — colored, indented output and integer prompts.
//!
//! Generic over the reader and writer so the menu can be driven from tests.

use std::io::{BufRead, Write};

use homesim_domain::report::{Report, Tone};

use crate::config::DisplayConfig;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[1;91m";
const GREEN: &str = "\x1b[1;92m";
const YELLOW: &str = "\x1b[1;93m";
const CYAN: &str = "\x1b[1;96m";
const BOLD: &str = "\x1b[1m";
const CLEAR: &str = "\x1b[2J\x1b[H";

const MARGIN: &str = "\t\t";

/// Visual style of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Heading,
    Prompt,
    Tone(Tone),
}

impl Style {
    fn code(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Heading => Some(BOLD),
            Self::Prompt => Some(CYAN),
            Self::Tone(Tone::Success) => Some(GREEN),
            Self::Tone(Tone::Alert) => Some(RED),
            Self::Tone(Tone::Info) => Some(CYAN),
            Self::Tone(Tone::Warning) => Some(YELLOW),
        }
    }
}

/// Failures at the input boundary.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The input stream ended.
    #[error("input closed")]
    Closed,
    /// A number was expected. Returned by [`parse_int`]; [`Console::read_int`]
    /// re-prompts instead.
    #[error("not a number: {0:?}")]
    InvalidInput(String),
    /// Reading or writing the terminal failed.
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
}

/// Parse a user-typed integer, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidInput`] when `line` is not an integer.
pub fn parse_int(line: &str) -> Result<i64, ConsoleError> {
    let trimmed = line.trim();
    trimmed
        .parse()
        .map_err(|_| ConsoleError::InvalidInput(trimmed.to_string()))
}

/// Line-oriented terminal session.
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, display: &DisplayConfig) -> Self {
        Self {
            input,
            output,
            color: display.color,
            clear_screen: display.clear_screen,
        }
    }

    /// Consume the console, handing back the writer.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one indented line.
    pub fn say(&mut self, text: &str, style: Style) -> Result<(), ConsoleError> {
        self.write_styled(text, style)?;
        writeln!(self.output)?;
        Ok(())
    }

    /// Write every line of a report with its tone.
    pub fn report(&mut self, report: &Report) -> Result<(), ConsoleError> {
        for line in report.lines() {
            self.say(&line.text, Style::Tone(line.tone))?;
        }
        Ok(())
    }

    pub fn blank(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Clear the terminal when enabled; always leaves a top margin.
    pub fn clear(&mut self) -> Result<(), ConsoleError> {
        if self.clear_screen {
            write!(self.output, "{CLEAR}")?;
        }
        write!(self.output, "\n\n")?;
        Ok(())
    }

    /// Show `prompt` and return the next input line without its newline.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Closed`] at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.write_styled(prompt, Style::Prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Show `prompt` and read an integer, re-prompting until one is typed.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Closed`] at end of input.
    pub fn read_int(&mut self, prompt: &str) -> Result<i64, ConsoleError> {
        let mut line = self.ask(prompt)?;
        loop {
            match parse_int(&line) {
                Ok(value) => return Ok(value),
                Err(ConsoleError::InvalidInput(_)) => {
                    self.write_styled(
                        "Invalid input! Please enter a number: ",
                        Style::Tone(Tone::Alert),
                    )?;
                    self.output.flush()?;
                    line = self.read_line()?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Ask a yes/no question; only `y` or `Y` count as yes.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Closed`] at end of input.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, ConsoleError> {
        let answer = self.ask(prompt)?;
        Ok(matches!(answer.trim_start().chars().next(), Some('y' | 'Y')))
    }

    /// Block until the user presses Enter.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Closed`] at end of input.
    pub fn pause(&mut self) -> Result<(), ConsoleError> {
        self.ask("Press Enter to continue...")?;
        Ok(())
    }

    fn write_styled(&mut self, text: &str, style: Style) -> Result<(), ConsoleError> {
        match style.code().filter(|_| self.color) {
            Some(code) => write!(self.output, "{MARGIN}{code}{text}{RESET}")?,
            None => write!(self.output, "{MARGIN}{text}")?,
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
