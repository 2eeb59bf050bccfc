//! In-memory audio backend for tests.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::audio::device::{ActiveStream, AudioHost, Device, ErrorCallback, InputCallback};
use crate::error::ScopeError;

pub struct FakeStream {
    stopped: Arc<AtomicBool>,
}

impl ActiveStream for FakeStream {
    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Reports one input device. `open_input` synchronously pushes `feed`
/// through the callback once, as if the hardware had delivered it, then
/// reports `stream_error` if one is set.
pub struct FakeHost {
    devices: Vec<Device>,
    sample_rate: Option<u32>,
    fail_open: bool,
    feed: Vec<f32>,
    stream_error: Option<String>,
    stopped: Arc<AtomicBool>,
    opened: RefCell<usize>,
}

impl FakeHost {
    pub fn with_feed(feed: Vec<f32>) -> Self {
        Self {
            devices: vec![
                Device {
                    index: 0,
                    name: "Monitor".to_string(),
                    input_channels: 0,
                },
                Device {
                    index: 1,
                    name: "Fake Mic".to_string(),
                    input_channels: 1,
                },
            ],
            sample_rate: Some(48_000),
            fail_open: false,
            feed,
            stream_error: None,
            stopped: Arc::new(AtomicBool::new(false)),
            opened: RefCell::new(0),
        }
    }

    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::with_feed(Vec::new())
        }
    }

    pub fn without_rate(mut self) -> Self {
        self.sample_rate = None;
        self
    }

    pub fn with_stream_error(mut self, message: &str) -> Self {
        self.stream_error = Some(message.to_string());
        self
    }

    pub fn input_device(&self) -> Device {
        self.devices[1].clone()
    }

    pub fn stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        *self.opened.borrow()
    }
}

impl AudioHost for FakeHost {
    type Stream = FakeStream;

    fn devices(&self) -> Result<Vec<Device>, ScopeError> {
        Ok(self.devices.clone())
    }

    fn default_sample_rate(&self, _device: &Device) -> Result<u32, ScopeError> {
        self.sample_rate
            .ok_or_else(|| ScopeError::DeviceInfo("device vanished".to_string()))
    }

    fn open_input(
        &self,
        device: &Device,
        _sample_rate: u32,
        _block_size: usize,
        mut callback: InputCallback,
        mut on_error: ErrorCallback,
    ) -> Result<FakeStream, ScopeError> {
        if self.fail_open {
            return Err(ScopeError::StreamOpen(format!(
                "invalid sample rate for {}",
                device.name
            )));
        }
        *self.opened.borrow_mut() += 1;
        callback(&self.feed, 1);
        if let Some(message) = &self.stream_error {
            on_error(message.clone());
        }
        Ok(FakeStream {
            stopped: Arc::clone(&self.stopped),
        })
    }
}
