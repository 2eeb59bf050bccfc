use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SampleRate, SizedSample, StreamConfig};
use log::{info, warn};

use crate::audio::device::{ActiveStream, AudioHost, Device, ErrorCallback, InputCallback};
use crate::error::ScopeError;

/// The platform's default cpal host. Device indices are positions in
/// `Host::devices()`, matching what the settings file stores.
pub struct CpalHost {
    host: cpal::Host,
}

pub struct CpalStream {
    stream: cpal::Stream,
}

impl ActiveStream for CpalStream {
    fn stop(&mut self) {
        if let Err(e) = self.stream.pause() {
            warn!("Failed to pause capture stream: {}", e);
        }
    }
}

impl CpalHost {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }

    fn device_at(&self, index: usize) -> Option<cpal::Device> {
        self.host.devices().ok()?.nth(index)
    }
}

fn max_input_channels(device: &cpal::Device) -> u16 {
    match device.supported_input_configs() {
        Ok(configs) => configs.map(|c| c.channels()).max().unwrap_or(0),
        Err(_) => 0,
    }
}

/// Mono when some supported config offers one channel at `sample_rate`,
/// otherwise the device's own channel count. Many hardware inputs only
/// open with their native layout; the first channel is kept either way.
fn pick_channels<I>(supported: I, sample_rate: u32, native: u16) -> u16
where
    I: IntoIterator<Item = (u16, u32, u32)>,
{
    let mono = supported
        .into_iter()
        .any(|(channels, min, max)| channels == 1 && (min..=max).contains(&sample_rate));
    if mono {
        1
    } else {
        native.max(1)
    }
}

/// Callback buffers are usually `block_size` frames but some backends hand
/// over more; the scratch buffer is sized for that up front.
const SCRATCH_HEADROOM: usize = 4;

impl AudioHost for CpalHost {
    type Stream = CpalStream;

    fn devices(&self) -> Result<Vec<Device>, ScopeError> {
        let devices = self
            .host
            .devices()
            .map_err(|e| ScopeError::DeviceInfo(e.to_string()))?;

        Ok(devices
            .enumerate()
            .map(|(index, device)| Device {
                index,
                name: device.name().unwrap_or_else(|_| "Unknown Device".to_string()),
                input_channels: max_input_channels(&device),
            })
            .collect())
    }

    fn default_sample_rate(&self, device: &Device) -> Result<u32, ScopeError> {
        let cpal_device = self
            .device_at(device.index)
            .ok_or_else(|| ScopeError::DeviceInfo(format!("device {} not found", device.index)))?;
        let config = cpal_device
            .default_input_config()
            .map_err(|e| ScopeError::DeviceInfo(e.to_string()))?;
        Ok(config.sample_rate().0)
    }

    fn open_input(
        &self,
        device: &Device,
        sample_rate: u32,
        block_size: usize,
        callback: InputCallback,
        on_error: ErrorCallback,
    ) -> Result<CpalStream, ScopeError> {
        let cpal_device = self
            .device_at(device.index)
            .ok_or_else(|| ScopeError::StreamOpen(format!("device {} not found", device.index)))?;

        let sample_format = match cpal_device.default_input_config() {
            Ok(config) => config.sample_format(),
            Err(e) => {
                warn!("No default input config for {}: {}; assuming f32", device.name, e);
                SampleFormat::F32
            }
        };

        let channels = match cpal_device.supported_input_configs() {
            Ok(configs) => pick_channels(
                configs.map(|c| (c.channels(), c.min_sample_rate().0, c.max_sample_rate().0)),
                sample_rate,
                device.input_channels,
            ),
            Err(e) => {
                warn!("Could not list input configs for {}: {}", device.name, e);
                device.input_channels.max(1)
            }
        };
        if channels > 1 {
            info!("{} has no mono input; opening {} channels", device.name, channels);
        }

        let config = StreamConfig {
            channels,
            sample_rate: SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Fixed(block_size as u32),
        };

        let stream = match sample_format {
            SampleFormat::F32 => {
                build_stream::<f32>(&cpal_device, &config, block_size, callback, on_error)
            }
            SampleFormat::I16 => {
                build_stream::<i16>(&cpal_device, &config, block_size, callback, on_error)
            }
            SampleFormat::U16 => {
                build_stream::<u16>(&cpal_device, &config, block_size, callback, on_error)
            }
            other => Err(ScopeError::StreamOpen(format!(
                "unsupported sample format {:?}",
                other
            ))),
        }?;

        stream
            .play()
            .map_err(|e| ScopeError::StreamOpen(format!("failed to start stream: {}", e)))?;

        Ok(CpalStream { stream })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    block_size: usize,
    mut callback: InputCallback,
    mut on_error: ErrorCallback,
) -> Result<cpal::Stream, ScopeError>
where
    T: SizedSample + Send + 'static,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    let mut scratch: Vec<f32> = Vec::with_capacity(block_size * channels * SCRATCH_HEADROOM);

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                scratch.clear();
                scratch.extend(data.iter().map(|&s| s.to_sample::<f32>()));
                callback(&scratch, channels);
            },
            move |err| on_error(err.to_string()),
            None,
        )
        .map_err(|e| ScopeError::StreamOpen(e.to_string()))
}
