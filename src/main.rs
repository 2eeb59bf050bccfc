mod app;
mod audio;
mod config;
mod constants;
mod error;
mod input;
mod logging;
mod messages;
mod render;
mod session;
mod settings;
mod status;
#[cfg(test)]
mod testing;
mod ui;

use std::io;

use log::{error, info, warn};

use crate::audio::cpal_host::CpalHost;
use crate::audio::device::{self, DeviceCatalog};
use crate::config::Config;
use crate::settings::SettingsStore;
use crate::ui::terminal::TerminalDisplay;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // --- Config + logging ---
    let config = Config::from_env();
    logging::init(&config.log_path());
    for warning in &config.warnings {
        warn!("{}", warning);
    }

    // --- Settings ---
    let mut store = SettingsStore::new(config.settings_path.clone());
    let settings = store.load();
    info!("Settings file: {}", store.path().display());

    // --- Device selection ---
    let host = CpalHost::new();
    let catalog = DeviceCatalog::list_input_devices(&host).map_err(|e| {
        error!("{}", e);
        e
    })?;
    info!("{} input devices available", catalog.devices().len());

    let device = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();
        catalog.resolve_device(settings.device_index, config.selection_mode, &mut input, &mut out)?
    };
    let sample_rate = device::sample_rate(&host, &device, config.fallback_sample_rate);

    info!("Starting oscilloscope on {} ({})", device.index, device.name);

    // --- Capture + display ---
    let report = session::run_session(
        &host,
        &config,
        &device,
        sample_rate,
        settings,
        &mut store,
        TerminalDisplay::open,
    );

    let ended_by = report
        .error
        .map(|e| format!("; ended by: {}", e))
        .unwrap_or_default();
    info!(
        "Session over: gain {:.2}, smoothing {:.2}, {} blocks shown, {} dropped{}",
        report.settings.gain,
        report.settings.smoothing,
        report.blocks_shown,
        report.dropped,
        ended_by
    );
    Ok(())
}
