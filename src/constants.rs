use std::ops::RangeInclusive;

/// Samples per hand-off block
pub const BLOCK_SIZE: usize = 2048;
/// Blocks buffered between the capture callback and the render loop
pub const QUEUE_CAPACITY: usize = 10;
/// Used when the device cannot report its default rate
pub const FALLBACK_SAMPLE_RATE: u32 = 44_100;
/// How long the render loop waits for a block before idling
pub const DEQUEUE_TIMEOUT_MS: u64 = 20;
pub const IDLE_PAUSE_MS: u64 = 10;

pub const GAIN_RANGE: RangeInclusive<f32> = 0.5..=50.0;
pub const SMOOTHING_RANGE: RangeInclusive<f32> = 0.0..=0.99;
pub const DEFAULT_GAIN: f32 = 1.0;
pub const DEFAULT_SMOOTHING: f32 = 0.8;
/// Slider increments per key press
pub const GAIN_STEP: f32 = 0.5;
pub const SMOOTHING_STEP: f32 = 0.01;

pub const SETTINGS_FILE: &str = "crt_audio_oscilloscope_config.json";
pub const LOG_FILE: &str = "micscope.log";
