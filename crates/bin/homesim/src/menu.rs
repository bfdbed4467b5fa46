//! Text menu — turns typed numbers into [`HomeController`] calls and renders
//! their outcomes.

use std::io::{BufRead, Write};

use homesim_app::ports::{ActionLog, ClearOutcome};
use homesim_app::services::home_controller::{
    ControlOutcome, DeviceAction, HomeController, ResetOutcome,
};
use homesim_domain::error::HomeError;
use homesim_domain::log_entry::{LogEntry, SYSTEM};
use homesim_domain::report::Tone;

use crate::console::{Console, ConsoleError, Style};

/// Top-level menu entries, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Control,
    ViewLog,
    ClearLog,
    ResetAll,
    Exit,
}

impl Command {
    const ALL: [(Self, &'static str); 6] = [
        (Self::List, "List devices"),
        (Self::Control, "Control a device"),
        (Self::ViewLog, "View log"),
        (Self::ClearLog, "Clear log"),
        (Self::ResetAll, "Reset all devices"),
        (Self::Exit, "Exit"),
    ];

    /// Map a 1-based menu number to a command.
    #[must_use]
    pub fn from_choice(choice: i64) -> Option<Self> {
        let index = usize::try_from(choice).ok()?.checked_sub(1)?;
        Self::ALL.get(index).map(|(command, _)| *command)
    }
}

/// Map the 1-based action number of the control sub-menu. `Adjust` carries
/// a placeholder value filled in once the user types it.
fn action_from_choice(choice: i64) -> Option<DeviceAction> {
    match choice {
        1 => Some(DeviceAction::Toggle),
        2 => Some(DeviceAction::Adjust(0)),
        3 => Some(DeviceAction::ShowState),
        _ => None,
    }
}

/// Whether the loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// The interactive menu loop.
pub struct Menu<'a, L, R, W> {
    controller: &'a mut HomeController<L>,
    console: Console<R, W>,
}

impl<'a, L: ActionLog, R: BufRead, W: Write> Menu<'a, L, R, W> {
    pub fn new(controller: &'a mut HomeController<L>, console: Console<R, W>) -> Self {
        Self {
            controller,
            console,
        }
    }

    /// Consume the menu, handing back the console.
    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run until the user confirms exit or input ends.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the terminal cannot be read or written.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        match self.run_loop() {
            Ok(()) | Err(ConsoleError::Closed) => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn run_loop(&mut self) -> Result<(), ConsoleError> {
        loop {
            self.console.clear()?;
            self.show_main_menu()?;
            let choice = self.console.read_int("Enter your choice: ")?;

            let flow = match Command::from_choice(choice) {
                Some(command) => self.dispatch(command)?,
                None => {
                    self.console
                        .say("Invalid choice! Try again.", Style::Tone(Tone::Alert))?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                return Ok(());
            }

            self.console.pause()?;
        }
    }

    fn show_main_menu(&mut self) -> Result<(), ConsoleError> {
        self.console.say("SMART HOME AUTOMATION SYSTEM", Style::Heading)?;
        self.console.blank()?;
        for (number, (_, label)) in Command::ALL.iter().enumerate() {
            self.console
                .say(&format!("{}. {label}", number + 1), Style::Heading)?;
        }
        self.console.blank()
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow, ConsoleError> {
        tracing::debug!(?command, "menu command");
        match command {
            Command::List => self.list_devices()?,
            Command::Control => self.control_device()?,
            Command::ViewLog => self.view_log()?,
            Command::ClearLog => self.clear_log()?,
            Command::ResetAll => self.reset_devices()?,
            Command::Exit => return self.exit(),
        }
        Ok(Flow::Continue)
    }

    fn list_devices(&mut self) -> Result<(), ConsoleError> {
        self.console.say("Available Devices:", Style::Heading)?;
        for listing in self.controller.list_devices() {
            self.console
                .say(&format!("{}. {}", listing.index, listing.name), Style::Plain)?;
        }
        Ok(())
    }

    fn control_device(&mut self) -> Result<(), ConsoleError> {
        self.list_devices()?;
        let choice = self.console.read_int("Enter the device number to control: ")?;
        let index = usize::try_from(choice).unwrap_or(0);
        let device = match self.controller.registry().get(index) {
            Ok(device) => device,
            Err(err) => {
                return self.console.say(
                    &HomeError::from(err).user_message(),
                    Style::Tone(Tone::Alert),
                );
            }
        };
        let range = device.setting_range();

        self.console.clear()?;
        self.console.say("1. Toggle ON/OFF", Style::Heading)?;
        self.console.say("2. Adjust settings", Style::Heading)?;
        self.console.say("3. Show state", Style::Heading)?;
        let choice = self.console.read_int("Enter your choice: ")?;

        let action = match action_from_choice(choice) {
            Some(DeviceAction::Adjust(_)) => {
                let prompt = match range {
                    Some(setting) => format!(
                        "Enter the {} ({} to {}): ",
                        setting.label,
                        setting.range.start(),
                        setting.range.end()
                    ),
                    None => "Enter the value to adjust: ".to_string(),
                };
                DeviceAction::Adjust(self.console.read_int(&prompt)?)
            }
            Some(action) => action,
            None => {
                return self
                    .console
                    .say("Invalid choice!", Style::Tone(Tone::Alert));
            }
        };

        self.console.clear()?;
        match self.controller.control_device(index, action) {
            Ok(outcome) => self.render_control(&outcome),
            Err(err) => self
                .console
                .say(&err.user_message(), Style::Tone(Tone::Alert)),
        }
    }

    fn render_control(&mut self, outcome: &ControlOutcome) -> Result<(), ConsoleError> {
        match &outcome.result {
            Ok(report) => self.console.report(report)?,
            Err(err @ HomeError::Unsupported(_)) => self
                .console
                .say(&err.user_message(), Style::Tone(Tone::Warning))?,
            Err(err) => self
                .console
                .say(&err.user_message(), Style::Tone(Tone::Alert))?,
        }
        self.warn_unlogged(outcome.log_error.as_ref())
    }

    fn reset_devices(&mut self) -> Result<(), ConsoleError> {
        let ResetOutcome { reports, log_error } = self.controller.reset_devices();
        for report in &reports {
            self.console.report(report)?;
        }
        self.console.say(
            "All devices have been reset to their OFF state.",
            Style::Tone(Tone::Success),
        )?;
        self.warn_unlogged(log_error.as_ref())
    }

    fn view_log(&mut self) -> Result<(), ConsoleError> {
        self.console.clear()?;
        match self.controller.view_log() {
            Ok(lines) => {
                self.console.say("Action Logs:", Style::Heading)?;
                if lines.is_empty() {
                    self.console
                        .say("No logs found.", Style::Tone(Tone::Warning))?;
                }
                for line in &lines {
                    let style = match line.parse::<LogEntry>() {
                        Ok(entry) if entry.device == SYSTEM => Style::Heading,
                        Ok(_) => Style::Plain,
                        Err(_) => Style::Tone(Tone::Warning),
                    };
                    self.console.say(line, style)?;
                }
                Ok(())
            }
            Err(err) => {
                self.console
                    .say("No logs available!", Style::Tone(Tone::Alert))?;
                self.console
                    .say(&err.user_message(), Style::Tone(Tone::Alert))
            }
        }
    }

    fn clear_log(&mut self) -> Result<(), ConsoleError> {
        match self.controller.clear_log() {
            Ok(ClearOutcome::AlreadyEmpty) => self.console.say(
                "No logs found. Log file is already empty.",
                Style::Tone(Tone::Warning),
            ),
            Ok(ClearOutcome::Cleared) => self
                .console
                .say("Log file cleared successfully.", Style::Tone(Tone::Success)),
            Err(err) => {
                self.console
                    .say("Failed to clear log file.", Style::Tone(Tone::Alert))?;
                self.console
                    .say(&err.user_message(), Style::Tone(Tone::Alert))
            }
        }
    }

    fn exit(&mut self) -> Result<Flow, ConsoleError> {
        self.console.clear()?;
        if self
            .console
            .confirm("Are you sure you want to exit? (y/n): ")?
        {
            self.console
                .say("Exiting system. Goodbye!", Style::Tone(Tone::Success))?;
            return Ok(Flow::Exit);
        }
        Ok(Flow::Continue)
    }

    fn warn_unlogged(&mut self, log_error: Option<&HomeError>) -> Result<(), ConsoleError> {
        match log_error {
            Some(err) => self.console.say(
                &format!("Warning: action not logged ({})", err.user_message()),
                Style::Tone(Tone::Warning),
            ),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Mutex;

    use homesim_domain::device::Device;

    use crate::config::DisplayConfig;

    #[derive(Default)]
    struct MemoryLog {
        lines: Mutex<Vec<String>>,
    }

    impl ActionLog for MemoryLog {
        fn append(&self, entry: &LogEntry) -> Result<(), HomeError> {
            self.lines.lock().unwrap().push(entry.to_string());
            Ok(())
        }

        fn read_all(&self) -> Result<Vec<String>, HomeError> {
            Ok(self.lines.lock().unwrap().clone())
        }

        fn clear(&self) -> Result<ClearOutcome, HomeError> {
            let mut lines = self.lines.lock().unwrap();
            if lines.is_empty() {
                return Ok(ClearOutcome::AlreadyEmpty);
            }
            lines.clear();
            Ok(ClearOutcome::Cleared)
        }
    }

    fn controller() -> HomeController<MemoryLog> {
        HomeController::new(
            [
                Device::light("L1"),
                Device::fan("F1"),
                Device::camera("C1"),
            ]
            .into_iter()
            .collect(),
            MemoryLog::default(),
        )
    }

    /// Feed `input` to a fresh menu and return everything it printed.
    fn drive(controller: &mut HomeController<MemoryLog>, input: &str) -> String {
        let display = DisplayConfig {
            color: false,
            clear_screen: false,
        };
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), &display);
        let mut menu = Menu::new(controller, console);
        menu.run().unwrap();
        String::from_utf8(menu.into_console().into_output()).unwrap()
    }

    #[test]
    fn should_map_menu_numbers_to_commands() {
        assert_eq!(Command::from_choice(1), Some(Command::List));
        assert_eq!(Command::from_choice(6), Some(Command::Exit));
        assert_eq!(Command::from_choice(0), None);
        assert_eq!(Command::from_choice(7), None);
        assert_eq!(Command::from_choice(-3), None);
    }

    #[test]
    fn should_map_action_numbers() {
        assert_eq!(action_from_choice(1), Some(DeviceAction::Toggle));
        assert_eq!(action_from_choice(3), Some(DeviceAction::ShowState));
        assert_eq!(action_from_choice(4), None);
    }

    #[test]
    fn should_stop_quietly_when_input_ends() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "");
        assert!(out.contains("SMART HOME AUTOMATION SYSTEM"));
    }

    #[test]
    fn should_list_devices_with_one_based_numbers() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "1\n\n");
        assert!(out.contains("1. L1"));
        assert!(out.contains("3. C1"));
    }

    #[test]
    fn should_adjust_light_through_control_menu() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "2\n1\n2\n70\n\n");

        assert!(out.contains("Enter the brightness (0 to 100): "));
        assert!(out.contains("L1 turned ON."));
        assert!(out.contains("L1 brightness set to 70%."));
        assert!(ctrl.registry().get(1).unwrap().is_on());
        assert_eq!(
            ctrl.view_log().unwrap(),
            vec!["L1: Adjusted setting to 70"]
        );
    }

    #[test]
    fn should_reprompt_on_non_numeric_value() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "2\n2\n2\nfast\n3\n\n");
        assert!(out.contains("Invalid input! Please enter a number: "));
        assert!(out.contains("F1 speed set to Full."));
    }

    #[test]
    fn should_report_invalid_device_number_without_logging() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "2\n99\n\n");
        assert!(out.contains("invalid device number 99: expected 1 to 3"));
        assert!(ctrl.view_log().unwrap().is_empty());
    }

    #[test]
    fn should_warn_when_camera_has_no_settings() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "2\n3\n2\n5\n\n");
        assert!(out.contains("C1 has no adjustable settings"));
        assert_eq!(ctrl.view_log().unwrap(), vec!["C1: Adjusted setting to 5"]);
    }

    #[test]
    fn should_report_invalid_action_choice() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "2\n1\n9\n\n");
        assert!(out.contains("Invalid choice!"));
        assert!(ctrl.view_log().unwrap().is_empty());
    }

    #[test]
    fn should_reset_and_clear_log() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "2\n2\n1\n\n5\n\n4\n\n4\n\n");

        assert!(out.contains("F1 turned ON with speed set to Medium."));
        assert!(out.contains("All devices have been reset to their OFF state."));
        assert!(out.contains("Log file cleared successfully."));
        assert!(out.contains("No logs found. Log file is already empty."));
        assert!(!ctrl.registry().get(2).unwrap().is_on());
    }

    #[test]
    fn should_show_log_lines_in_order() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "2\n1\n1\n\n5\n\n3\n\n");
        let first = out.find("L1: Toggled ON").unwrap();
        let second = out.find("System: All devices reset to OFF").unwrap();
        assert!(first < second);
    }

    #[test]
    fn should_stay_in_loop_when_exit_declined() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "6\nn\n\n6\ny\n");
        assert_eq!(out.matches("Are you sure you want to exit? (y/n): ").count(), 2);
        assert!(out.ends_with("Exiting system. Goodbye!\n"));
    }

    #[test]
    fn should_reject_unknown_menu_number() {
        let mut ctrl = controller();
        let out = drive(&mut ctrl, "8\n\n");
        assert!(out.contains("Invalid choice! Try again."));
    }
}
