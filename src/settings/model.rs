use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GAIN, DEFAULT_SMOOTHING, GAIN_RANGE, SMOOTHING_RANGE};
use crate::error::ScopeError;

/// User-tunable values that survive restarts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub device_index: Option<usize>,
    pub gain: f32,
    /// Loaded, shown and saved, but not applied to the signal.
    pub smoothing: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_index: None,
            gain: DEFAULT_GAIN,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

impl Settings {
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = clamp_gain(gain);
        self
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = clamp_smoothing(smoothing);
        self
    }
}

pub fn clamp_gain(gain: f32) -> f32 {
    gain.clamp(*GAIN_RANGE.start(), *GAIN_RANGE.end())
}

pub fn clamp_smoothing(smoothing: f32) -> f32 {
    smoothing.clamp(*SMOOTHING_RANGE.start(), *SMOOTHING_RANGE.end())
}

/// On-disk shape. Every field is optional when reading so a partial file
/// still loads; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct StoredSettings {
    pub device_index: Option<usize>,
    pub gain: Option<f64>,
    pub smoothing: Option<f64>,
}

impl StoredSettings {
    pub fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            device_index: self.device_index,
            gain: clamp_gain(self.gain.map(|g| g as f32).unwrap_or(defaults.gain)),
            smoothing: clamp_smoothing(
                self.smoothing.map(|s| s as f32).unwrap_or(defaults.smoothing),
            ),
        }
    }
}

/// Exactly the three canonical fields, all present, numbers as floats.
#[derive(Debug, Serialize)]
pub(crate) struct PersistedSettings {
    pub device_index: usize,
    pub gain: f64,
    pub smoothing: f64,
}

impl TryFrom<&Settings> for PersistedSettings {
    type Error = ScopeError;

    fn try_from(settings: &Settings) -> Result<Self, Self::Error> {
        let device_index = settings.device_index.ok_or(ScopeError::IncompleteSettings)?;
        Ok(Self {
            device_index,
            gain: settings.gain as f64,
            smoothing: settings.smoothing as f64,
        })
    }
}
