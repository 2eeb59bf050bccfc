use log::{error, info, warn};

use crate::app::SessionInfo;
use crate::audio::capture::{self, CaptureShared};
use crate::audio::device::{AudioHost, Device};
use crate::audio::gain::SharedGain;
use crate::audio::queue::{handoff_queue, DropCounter};
use crate::config::Config;
use crate::error::ScopeError;
use crate::render::RenderLoop;
use crate::settings::{Settings, SettingsSink};
use crate::status::StatusBoard;
use crate::ui::Display;

/// How a session ended. `error` is already reported by the time the
/// caller sees it.
#[derive(Debug)]
pub struct SessionReport {
    pub settings: Settings,
    pub blocks_shown: u64,
    pub dropped: u64,
    pub error: Option<ScopeError>,
}

/// One capture/display cycle on an already chosen device.
///
/// Capture starts first; the display is only opened once the stream is
/// live. Whatever happens, the stream is stopped, the display is closed,
/// and the final settings are persisted exactly once before returning.
pub fn run_session<H, D, S, F>(
    host: &H,
    config: &Config,
    device: &Device,
    sample_rate: u32,
    settings: Settings,
    sink: &mut S,
    open_display: F,
) -> SessionReport
where
    H: AudioHost,
    D: Display,
    S: SettingsSink,
    F: FnOnce(SessionInfo, &Settings, DropCounter) -> Result<D, ScopeError>,
{
    let settings = Settings {
        device_index: Some(device.index),
        ..settings
    };
    let (producer, consumer) =
        handoff_queue(config.queue_capacity, config.drop_policy, config.block_size);
    let shared = CaptureShared {
        gain: SharedGain::new(settings.gain),
        pool: producer.pool(),
        status: StatusBoard::default(),
    };
    let dropped = consumer.dropped();
    let mut render = RenderLoop::new(
        settings,
        shared.gain.clone(),
        consumer,
        shared.status.clone(),
        config,
    );

    let capture = capture::start(
        host,
        device,
        sample_rate,
        config.block_size,
        shared,
        move |block| {
            producer.try_enqueue(block);
        },
    );

    let outcome = match capture {
        Ok(stream) => {
            let info = SessionInfo {
                device_name: stream.device_name().to_string(),
                sample_rate,
                block_size: config.block_size,
            };
            // Display drops (and restores the terminal) before the stream stops.
            let result = open_display(info, &settings, dropped.clone())
                .and_then(|mut display| render.run(&mut display, sink));
            drop(stream);
            if let Err(e) = &result {
                error!("Session ended with an error: {}", e);
            }
            result
        }
        Err(e) => {
            error!("Error starting audio stream: {}", e);
            warn!("Try selecting a different microphone.");
            Err(e)
        }
    };

    let (blocks_shown, error) = match outcome {
        Ok(shown) => (shown, None),
        Err(e) => (0, Some(e)),
    };

    let final_settings = render.settings();
    if sink.persist(&final_settings).is_err() {
        warn!("Changes made during this session were not saved.");
    }
    info!("Oscilloscope stopped.");

    SessionReport {
        settings: final_settings,
        blocks_shown,
        dropped: dropped.get(),
        error,
    }
}
