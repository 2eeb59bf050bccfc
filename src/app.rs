use crate::audio::block::{rms_dbfs, AudioBlock};
use crate::constants::{GAIN_STEP, SMOOTHING_STEP};
use crate::messages::{Control, ControlChange, UiEvent};
use crate::settings::model::{clamp_gain, clamp_smoothing};
use crate::settings::Settings;

/// Static facts about the session shown in the header.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub device_name: String,
    pub sample_rate: u32,
    pub block_size: usize,
}

/// Everything the terminal view draws from.
pub struct AppState {
    pub info: SessionInfo,
    pub gain: f32,
    pub smoothing: f32,
    pub selected: Control,
    /// Latest block, replaced wholesale on every update
    pub trace: Vec<f32>,
    pub loudness_db: f32,
    pub dropped: u64,
    /// Latest problem worth telling the operator about, shown in the footer.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(info: SessionInfo, settings: &Settings) -> Self {
        Self {
            trace: vec![0.0; info.block_size],
            info,
            gain: settings.gain,
            smoothing: settings.smoothing,
            selected: Control::Gain,
            loudness_db: -120.0,
            dropped: 0,
            status: None,
            should_quit: false,
        }
    }

    pub fn show_block(&mut self, block: &AudioBlock) {
        self.trace.clear();
        self.trace.extend_from_slice(block.samples());
        self.loudness_db = rms_dbfs(block.samples());
    }

    pub fn show_status(&mut self, message: &str) {
        self.status = Some(message.to_string());
    }

    /// Apply a key event; slider moves come back as a change to report.
    pub fn handle_event(&mut self, event: UiEvent) -> Option<ControlChange> {
        match event {
            UiEvent::Quit => {
                self.should_quit = true;
                None
            }
            UiEvent::SelectNext | UiEvent::SelectPrev => {
                self.selected = self.selected.next();
                None
            }
            UiEvent::Increase => self.nudge(1.0),
            UiEvent::Decrease => self.nudge(-1.0),
        }
    }

    fn nudge(&mut self, direction: f32) -> Option<ControlChange> {
        match self.selected {
            Control::Gain => {
                let gain = clamp_gain(self.gain + GAIN_STEP * direction);
                if gain == self.gain {
                    return None;
                }
                self.gain = gain;
                Some(ControlChange::Gain(gain))
            }
            Control::Smoothing => {
                let smoothing = clamp_smoothing(self.smoothing + SMOOTHING_STEP * direction);
                if smoothing == self.smoothing {
                    return None;
                }
                self.smoothing = smoothing;
                Some(ControlChange::Smoothing(smoothing))
            }
        }
    }
}
