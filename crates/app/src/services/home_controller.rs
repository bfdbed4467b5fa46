//! Home controller — use-cases driven by the command menu (or any caller).
//!
//! Owns the device [`Registry`] and an [`ActionLog`] implementation. Logging
//! failures never abort a device operation: they are traced and handed back
//! to the caller alongside the device outcome.

use homesim_domain::device::Device;
use homesim_domain::error::HomeError;
use homesim_domain::log_entry::LogEntry;
use homesim_domain::registry::{Listing, Registry};
use homesim_domain::report::Report;

use crate::ports::{ActionLog, ClearOutcome};

/// What to do with the selected device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    Toggle,
    Adjust(i64),
    ShowState,
}

/// Result of [`HomeController::control_device`] once the device was resolved.
#[derive(Debug)]
pub struct ControlOutcome {
    /// Name of the device the action targeted.
    pub device: String,
    /// What the device reported, or why it refused the action.
    pub result: Result<Report, HomeError>,
    /// Set when the log entry for this action could not be written.
    pub log_error: Option<HomeError>,
}

/// Result of [`HomeController::reset_devices`].
#[derive(Debug)]
pub struct ResetOutcome {
    /// One report per device that was switched off.
    pub reports: Vec<Report>,
    pub log_error: Option<HomeError>,
}

/// Application service orchestrating devices and the action log.
pub struct HomeController<L> {
    registry: Registry,
    log: L,
}

impl<L: ActionLog> HomeController<L> {
    /// Create a controller over the given devices, logging to `log`.
    pub fn new(registry: Registry, log: L) -> Self {
        Self { registry, log }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// 1-based device listing, in display order.
    #[must_use]
    pub fn list_devices(&self) -> Vec<Listing> {
        self.registry.list()
    }

    /// Apply `action` to the device at 1-based `index`.
    ///
    /// Toggles are logged with the resulting power state. Adjustments are
    /// logged with the attempted value even when the device rejects it.
    /// Showing the state is never logged.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::OutOfRange`] when `index` matches no device; in
    /// that case nothing is mutated or logged.
    #[tracing::instrument(skip(self))]
    pub fn control_device(
        &mut self,
        index: usize,
        action: DeviceAction,
    ) -> Result<ControlOutcome, HomeError> {
        let device = self.registry.get_mut(index)?;
        let name = device.name().to_string();

        let (result, entry) = match action {
            DeviceAction::Toggle => {
                let report = device.toggle();
                (Ok(report), Some(LogEntry::toggled(&name, device.is_on())))
            }
            DeviceAction::Adjust(value) => (
                device.adjust_setting(value),
                Some(LogEntry::adjusted(&name, value)),
            ),
            DeviceAction::ShowState => (Ok(device.show_state()), None),
        };

        if let Err(err) = &result {
            tracing::debug!(device = %name, reason = %err.user_message(), "device rejected action");
        }

        let log_error = entry.and_then(|entry| self.record(&entry));

        Ok(ControlOutcome {
            device: name,
            result,
            log_error,
        })
    }

    /// Switch off every device that is on, through its own toggle rules, then
    /// record a single summary entry (even when nothing was on).
    #[tracing::instrument(skip(self))]
    pub fn reset_devices(&mut self) -> ResetOutcome {
        let reports: Vec<Report> = self
            .registry
            .iter_mut()
            .filter(|device| device.is_on())
            .map(Device::toggle)
            .collect();

        tracing::info!(count = reports.len(), "devices reset to off");

        ResetOutcome {
            reports,
            log_error: self.record(&LogEntry::reset_all()),
        }
    }

    /// Every log line, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::LogUnavailable`] if the log exists but cannot be read.
    pub fn view_log(&self) -> Result<Vec<String>, HomeError> {
        self.log.read_all()
    }

    /// Empty the action log.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::LogUnavailable`] if the log cannot be truncated.
    #[tracing::instrument(skip(self))]
    pub fn clear_log(&self) -> Result<ClearOutcome, HomeError> {
        let outcome = self.log.clear()?;
        tracing::info!(?outcome, "action log cleared");
        Ok(outcome)
    }

    fn record(&self, entry: &LogEntry) -> Option<HomeError> {
        match self.log.append(entry) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(
                    %entry,
                    reason = %err.user_message(),
                    "failed to append to action log"
                );
                Some(err)
            }
        }
    }
}
