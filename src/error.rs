use thiserror::Error;

/// Everything that can go wrong between startup and shutdown.
///
/// Only failing to get a device (`NoDevice`, or a selection or prompt that
/// cannot complete) ends the process; the rest are either recovered where
/// they happen or end the capture session cleanly.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("corrupt settings file: {0}")]
    ConfigCorrupt(String),

    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings are incomplete: no device selected")]
    IncompleteSettings,

    #[error("No valid microphone devices found.")]
    NoDevice,

    #[error("invalid device selection: {0}")]
    InvalidSelection(String),

    #[error("device prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("could not query device info: {0}")]
    DeviceInfo(String),

    #[error("could not open audio stream: {0}")]
    StreamOpen(String),

    #[error("No audio data received.")]
    EmptyFrame,

    #[error("terminal error: {0}")]
    Terminal(String),
}
