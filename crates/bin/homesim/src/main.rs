//! # homesim — smart home simulator
//!
//! Composition root that wires the domain, the application service and the
//! file adapter together, then hands control to the text menu.
//!
//! ## Responsibilities
//! - Load configuration (`homesim.toml`, environment variables)
//! - Install the tracing subscriber (stderr, so the menu on stdout stays clean)
//! - Seed the device registry
//! - Construct the file action log and the home controller
//! - Run the menu over stdin/stdout until the user exits
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod console;
mod menu;

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context;

use homesim_adapter_log_file::FileActionLog;
use homesim_app::services::home_controller::HomeController;

use crate::config::Config;
use crate::console::Console;
use crate::menu::Menu;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("homesim error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let mut config = Config::load().context("failed to load configuration")?;
    let filter_error = init_tracing(&config.logging.filter)?;
    if let Some(error) = filter_error {
        tracing::warn!(
            filter = %config.logging.filter,
            fallback = config::DEFAULT_FILTER,
            %error,
            "invalid log filter, using fallback"
        );
    }

    if !std::io::stdout().is_terminal() {
        config.display.color = false;
        config.display.clear_screen = false;
    }

    let registry = config.registry();
    let log = FileActionLog::new(&config.log.path);
    tracing::info!(
        devices = registry.len(),
        log = %log.path().display(),
        "starting homesim"
    );
    for device in registry.iter() {
        match serde_json::to_string(device) {
            Ok(snapshot) => tracing::debug!(%snapshot, "device loaded"),
            Err(error) => tracing::debug!(%error, "device snapshot unavailable"),
        }
    }

    let mut controller = HomeController::new(registry, log);
    let console = Console::new(
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        &config.display,
    );
    Menu::new(&mut controller, console)
        .run()
        .context("terminal session failed")?;

    tracing::info!("homesim stopped");
    Ok(())
}

/// Install the stderr subscriber. An unparsable `filter` falls back to
/// [`config::DEFAULT_FILTER`] and its parse error is handed back so it can be
/// reported once tracing is up.
fn init_tracing(
    filter: &str,
) -> anyhow::Result<Option<tracing_subscriber::filter::ParseError>> {
    let (filter, error) = match tracing_subscriber::EnvFilter::try_new(filter) {
        Ok(filter) => (filter, None),
        Err(error) => (
            tracing_subscriber::EnvFilter::new(config::DEFAULT_FILTER),
            Some(error),
        ),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(error)
}
