use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::audio::gain::SharedGain;
use crate::audio::queue::BlockConsumer;
use crate::config::Config;
use crate::error::ScopeError;
use crate::messages::ControlChange;
use crate::settings::{Settings, SettingsSink};
use crate::status::StatusBoard;
use crate::ui::Display;

/// Drains the hand-off queue at the display's pace. Single-threaded and
/// cooperative: every iteration either shows a block or idles briefly, so
/// control events and the close signal are always seen within
/// `dequeue_timeout + idle_pause`.
pub struct RenderLoop {
    settings: Settings,
    gain: SharedGain,
    consumer: BlockConsumer,
    status: StatusBoard,
    dequeue_timeout: Duration,
    idle_pause: Duration,
}

impl RenderLoop {
    pub fn new(
        settings: Settings,
        gain: SharedGain,
        consumer: BlockConsumer,
        status: StatusBoard,
        config: &Config,
    ) -> Self {
        Self {
            settings,
            gain,
            consumer,
            status,
            dequeue_timeout: config.dequeue_timeout,
            idle_pause: config.idle_pause,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Run until the display closes. Every control change is applied and
    /// persisted immediately; the caller persists once more afterwards.
    /// The display redraws itself after input; this loop redraws for new
    /// blocks and new status messages.
    pub fn run<D, S>(&mut self, display: &mut D, sink: &mut S) -> Result<u64, ScopeError>
    where
        D: Display,
        S: SettingsSink,
    {
        info!("Render loop started");
        let mut shown: u64 = 0;

        while display.is_open() {
            let mut status_changed = false;
            for change in display.poll_controls()? {
                self.apply(change);
                if let Err(e) = sink.persist(&self.settings) {
                    display.show_status(&format!("Error saving config: {}", e));
                    status_changed = true;
                }
            }
            if let Some(message) = self.status.take() {
                display.show_status(&message);
                status_changed = true;
            }

            match self.consumer.dequeue(self.dequeue_timeout) {
                Some(block) => {
                    display.show_block(&block);
                    display.redraw()?;
                    self.consumer.recycle(block);
                    shown += 1;
                }
                None => {
                    if status_changed {
                        display.redraw()?;
                    }
                    thread::sleep(self.idle_pause);
                }
            }
        }

        info!(
            "Render loop finished: {} blocks shown, {} dropped",
            shown,
            self.consumer.dropped().get()
        );
        Ok(shown)
    }

    /// Clamp, store, and push gain to the capture callback.
    pub fn apply(&mut self, change: ControlChange) {
        match change {
            ControlChange::Gain(gain) => {
                self.settings = self.settings.with_gain(gain);
                self.gain.set(self.settings.gain);
                debug!("Gain set to {:.2}", self.settings.gain);
            }
            ControlChange::Smoothing(smoothing) => {
                self.settings = self.settings.with_smoothing(smoothing);
                debug!("Smoothing set to {:.2}", self.settings.smoothing);
            }
        }
    }
}
