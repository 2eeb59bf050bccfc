use crate::audio::queue::BufferPool;

/// One fixed-length batch of gain-adjusted samples, each in [-1.0, 1.0].
///
/// Blocks are built once by the capture callback and only read afterwards;
/// ownership moves through the hand-off queue to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBlock {
    samples: Vec<f32>,
}

impl AudioBlock {
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Give the buffer back, typically to the pool it came from.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

/// Apply gain and clamp into the displayable range.
pub fn amplify(sample: f32, gain: f32) -> f32 {
    clamp_sample(sample * gain)
}

pub fn clamp_sample(sample: f32) -> f32 {
    if sample.is_nan() {
        return 0.0;
    }
    sample.clamp(-1.0, 1.0)
}

/// Collects samples into blocks of exactly `block_size`, whatever size the
/// backend happens to deliver per callback. Buffers come from `pool`.
pub struct BlockAssembler {
    block_size: usize,
    pool: BufferPool,
    pending: Vec<f32>,
}

impl BlockAssembler {
    pub fn new(block_size: usize, pool: BufferPool) -> Self {
        let pending = pool.take();
        Self {
            block_size: block_size.max(1),
            pool,
            pending,
        }
    }

    /// Returns a finished block when this sample completes one.
    pub fn push(&mut self, sample: f32) -> Option<AudioBlock> {
        self.pending.push(sample);
        if self.pending.len() < self.block_size {
            return None;
        }
        let full = std::mem::replace(&mut self.pending, self.pool.take());
        Some(AudioBlock::from_samples(full))
    }
}

/// Min/max envelope per display column, for drawing a trace narrower than
/// the block.
pub fn column_extents(samples: &[f32], width: usize) -> Vec<(f32, f32)> {
    if samples.is_empty() || width == 0 {
        return vec![(0.0, 0.0); width];
    }
    (0..width)
        .map(|col| {
            let start = col * samples.len() / width;
            let end = ((col + 1) * samples.len() / width).max(start + 1).min(samples.len());
            let slice = &samples[start.min(samples.len() - 1)..end];
            slice
                .iter()
                .fold((f32::MAX, f32::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)))
        })
        .collect()
}

/// Block loudness in dBFS, floored at -120.
pub fn rms_dbfs(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return -120.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    let rms = (sum_squares / samples.len() as f32).sqrt();
    if rms <= 1e-6 {
        -120.0
    } else {
        20.0 * rms.log10()
    }
}
