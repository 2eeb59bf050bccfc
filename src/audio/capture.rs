use log::{error, info, warn};

use crate::audio::block::{amplify, AudioBlock, BlockAssembler};
use crate::audio::device::{ActiveStream, AudioHost, Device};
use crate::audio::gain::SharedGain;
use crate::audio::queue::BufferPool;
use crate::error::ScopeError;
use crate::status::StatusBoard;

/// Handles the capture callbacks share with the render side.
#[derive(Clone)]
pub struct CaptureShared {
    pub gain: SharedGain,
    pub pool: BufferPool,
    pub status: StatusBoard,
}

/// Runs inside the backend's real-time callback. Everything here is
/// bounded: one atomic load, one pass over the buffer, a non-blocking
/// hand-off per completed block.
pub struct CaptureProcessor<F> {
    gain: SharedGain,
    status: StatusBoard,
    assembler: BlockAssembler,
    on_block: F,
}

impl<F> CaptureProcessor<F>
where
    F: FnMut(AudioBlock),
{
    pub fn new(block_size: usize, shared: CaptureShared, on_block: F) -> Self {
        Self {
            gain: shared.gain,
            status: shared.status,
            assembler: BlockAssembler::new(block_size, shared.pool),
            on_block,
        }
    }

    /// `data` is interleaved; only the first channel of each frame is kept.
    pub fn process(&mut self, data: &[f32], channels: usize) {
        if data.is_empty() {
            warn!("{}", ScopeError::EmptyFrame);
            self.status.post("No audio data received.");
            return;
        }

        let gain = self.gain.get();
        for frame in data.chunks(channels.max(1)) {
            if let Some(block) = self.assembler.push(amplify(frame[0], gain)) {
                (self.on_block)(block);
            }
        }
    }
}

/// Owns a live input stream; stops and releases it when dropped.
pub struct StreamHandle<S: ActiveStream> {
    stream: Option<S>,
    device_name: String,
}

impl<S: ActiveStream> StreamHandle<S> {
    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl<S: ActiveStream> Drop for StreamHandle<S> {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            drop(stream);
            info!("Capture stream on {} released", self.device_name);
        }
    }
}

/// Open an input stream on `device` and feed `on_block` with mono
/// gain-adjusted blocks of exactly `block_size` samples.
///
/// The gain is read on every callback, so changes apply without reopening.
/// Backend errors are logged and posted to the status board.
pub fn start<H, F>(
    host: &H,
    device: &Device,
    sample_rate: u32,
    block_size: usize,
    shared: CaptureShared,
    on_block: F,
) -> Result<StreamHandle<H::Stream>, ScopeError>
where
    H: AudioHost,
    F: FnMut(AudioBlock) + Send + 'static,
{
    let status = shared.status.clone();
    let mut processor = CaptureProcessor::new(block_size, shared, on_block);
    let stream = host.open_input(
        device,
        sample_rate,
        block_size,
        Box::new(move |data: &[f32], channels: usize| processor.process(data, channels)),
        Box::new(move |message: String| {
            error!("Audio input error: {}", message);
            status.post(format!("Audio input error: {}", message));
        }),
    )?;

    info!(
        "Capturing from {} ({}) at {} Hz, {} samples per block",
        device.index, device.name, sample_rate, block_size
    );

    Ok(StreamHandle {
        stream: Some(stream),
        device_name: device.name.clone(),
    })
}
