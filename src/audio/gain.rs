use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Gain shared between the render thread (writer) and the audio callback
/// (reader). Stored as raw f32 bits so reads never tear or block.
#[derive(Debug, Clone)]
pub struct SharedGain {
    bits: Arc<AtomicU32>,
}

impl SharedGain {
    pub fn new(gain: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(gain.to_bits())),
        }
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn set(&self, gain: f32) {
        self.bits.store(gain.to_bits(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_updates() {
        let gain = SharedGain::new(1.0);
        let reader = gain.clone();
        gain.set(12.5);
        assert_eq!(reader.get(), 12.5);
    }

    #[test]
    fn visible_across_threads() {
        let gain = SharedGain::new(1.0);
        let reader = gain.clone();
        std::thread::spawn(move || gain.set(3.0)).join().unwrap();
        assert_eq!(reader.get(), 3.0);
    }
}
