use std::io::{BufRead, Write};

use log::{info, warn};

use crate::error::ScopeError;

/// Snapshot of one entry in the audio subsystem's device table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub index: usize,
    pub name: String,
    pub input_channels: u16,
}

/// Sample callback handed to the backend: interleaved samples plus the
/// channel count of the stream.
pub type InputCallback = Box<dyn FnMut(&[f32], usize) + Send + 'static>;

/// Receives errors the backend reports while the stream is running.
pub type ErrorCallback = Box<dyn FnMut(String) + Send + 'static>;

/// The part of an audio backend the scope consumes.
pub trait AudioHost {
    type Stream: ActiveStream;

    /// Every device the backend knows about, input-capable or not.
    fn devices(&self) -> Result<Vec<Device>, ScopeError>;

    fn default_sample_rate(&self, device: &Device) -> Result<u32, ScopeError>;

    /// Open an input stream delivering `block_size` frames per callback,
    /// mono when the device allows it.
    fn open_input(
        &self,
        device: &Device,
        sample_rate: u32,
        block_size: usize,
        callback: InputCallback,
        on_error: ErrorCallback,
    ) -> Result<Self::Stream, ScopeError>;
}

/// A running backend stream. Dropping it must release the device.
pub trait ActiveStream {
    fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Prompt on stdin until a valid index is entered.
    Interactive,
    /// Reject a missing or stale saved index instead of prompting.
    FailFast,
}

/// Input-capable devices, in the backend's table order.
#[derive(Debug, Clone)]
pub struct DeviceCatalog {
    devices: Vec<Device>,
}

impl DeviceCatalog {
    pub fn list_input_devices<H: AudioHost>(host: &H) -> Result<Self, ScopeError> {
        let all = host.devices().unwrap_or_else(|e| {
            warn!("Device enumeration failed: {}", e);
            Vec::new()
        });
        Self::from_devices(all)
    }

    pub fn from_devices(all: Vec<Device>) -> Result<Self, ScopeError> {
        let devices: Vec<Device> = all.into_iter().filter(|d| d.input_channels > 0).collect();
        if devices.is_empty() {
            return Err(ScopeError::NoDevice);
        }
        Ok(Self { devices })
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn find(&self, index: usize) -> Option<&Device> {
        self.devices.iter().find(|d| d.index == index)
    }

    /// Use the saved device if it is still eligible, otherwise ask for one.
    pub fn resolve_device<R: BufRead, W: Write>(
        &self,
        saved_index: Option<usize>,
        mode: SelectionMode,
        input: &mut R,
        out: &mut W,
    ) -> Result<Device, ScopeError> {
        if let Some(device) = saved_index.and_then(|i| self.find(i)) {
            info!("Using saved microphone: {} ({})", device.index, device.name);
            return Ok(device.clone());
        }

        if mode == SelectionMode::FailFast {
            return Err(ScopeError::InvalidSelection(match saved_index {
                Some(i) => format!("saved device {} is not an eligible input", i),
                None => "no saved device and prompting is disabled".to_string(),
            }));
        }

        self.prompt(input, out)
    }

    fn prompt<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<Device, ScopeError> {
        let default_index = self.devices[0].index;

        writeln!(out, "\nAvailable microphones:").map_err(ScopeError::Prompt)?;
        for device in &self.devices {
            writeln!(out, "  {}: {}", device.index, device.name).map_err(ScopeError::Prompt)?;
        }

        let mut line = String::new();
        loop {
            write!(out, "\nSelect microphone index (default {}): ", default_index)
                .map_err(ScopeError::Prompt)?;
            out.flush().map_err(ScopeError::Prompt)?;

            line.clear();
            if input.read_line(&mut line).map_err(ScopeError::Prompt)? == 0 {
                return Err(ScopeError::InvalidSelection(
                    "input closed before a device was chosen".to_string(),
                ));
            }

            let answer = line.trim();
            let selected = if answer.is_empty() {
                default_index
            } else {
                match answer.parse::<usize>() {
                    Ok(i) => i,
                    Err(_) => {
                        writeln!(out, "Invalid input. Try again.").map_err(ScopeError::Prompt)?;
                        continue;
                    }
                }
            };

            match self.find(selected) {
                Some(device) => return Ok(device.clone()),
                None => {
                    writeln!(out, "{} is not an available microphone. Try again.", selected)
                        .map_err(ScopeError::Prompt)?;
                }
            }
        }
    }
}

/// The device's default rate, or `fallback` when the query fails.
pub fn sample_rate<H: AudioHost>(host: &H, device: &Device, fallback: u32) -> u32 {
    match host.default_sample_rate(device) {
        Ok(rate) if rate > 0 => rate,
        Ok(_) => {
            warn!("Device {} reported a zero sample rate, using {} Hz", device.index, fallback);
            fallback
        }
        Err(e) => {
            warn!("Error getting device info: {}; using {} Hz", e, fallback);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::fake::FakeHost;
    use std::io::Cursor;

    fn device(index: usize, name: &str, input_channels: u16) -> Device {
        Device {
            index,
            name: name.to_string(),
            input_channels,
        }
    }

    fn catalog() -> DeviceCatalog {
        DeviceCatalog::from_devices(vec![
            device(0, "HDMI Output", 0),
            device(1, "Built-in Mic", 1),
            device(2, "Speakers", 0),
            device(3, "USB Interface", 2),
        ])
        .unwrap()
    }

    fn resolve(saved: Option<usize>, typed: &str) -> (Result<Device, ScopeError>, String) {
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = catalog().resolve_device(saved, SelectionMode::Interactive, &mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn filters_output_only_devices() {
        let indices: Vec<usize> = catalog().devices().iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn no_input_devices_is_fatal() {
        let result = DeviceCatalog::from_devices(vec![device(0, "Speakers", 0)]);
        assert!(matches!(result, Err(ScopeError::NoDevice)));
    }

    #[test]
    fn saved_eligible_index_skips_prompt() {
        let (result, printed) = resolve(Some(3), "");
        assert_eq!(result.unwrap().name, "USB Interface");
        assert!(printed.is_empty());
    }

    #[test]
    fn saved_ineligible_index_prompts() {
        let (result, printed) = resolve(Some(2), "1\n");
        assert_eq!(result.unwrap().index, 1);
        assert!(printed.contains("Available microphones"));
    }

    #[test]
    fn empty_answer_takes_first_eligible() {
        let (result, printed) = resolve(None, "\n");
        assert_eq!(result.unwrap().index, 1);
        assert!(printed.contains("(default 1)"));
    }

    #[test]
    fn rejects_until_valid() {
        let (result, printed) = resolve(None, "abc\n0\n2\n3\n");
        assert_eq!(result.unwrap().index, 3);
        assert_eq!(printed.matches("Select microphone index").count(), 4);
        assert!(printed.contains("Invalid input. Try again."));
        assert!(printed.contains("0 is not an available microphone"));
    }

    #[test]
    fn closed_input_is_invalid_selection() {
        let (result, _) = resolve(None, "7\n");
        assert!(matches!(result, Err(ScopeError::InvalidSelection(_))));
    }

    #[test]
    fn fail_fast_does_not_prompt() {
        let mut input = Cursor::new(b"1\n".to_vec());
        let mut out = Vec::new();
        let result = catalog().resolve_device(Some(9), SelectionMode::FailFast, &mut input, &mut out);
        assert!(matches!(result, Err(ScopeError::InvalidSelection(_))));
        assert!(out.is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn prompt_output_failure_is_a_prompt_error() {
        let mut input = Cursor::new(b"1\n".to_vec());
        let result =
            catalog().resolve_device(None, SelectionMode::Interactive, &mut input, &mut BrokenPipe);
        match result {
            Err(e @ ScopeError::Prompt(_)) => {
                assert!(e.to_string().starts_with("device prompt failed"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unreadable_input_is_a_prompt_error() {
        let mut input = std::io::BufReader::new(&[0xff, 0xfe, b'\n'][..]);
        let mut out = Vec::new();
        let result = catalog().resolve_device(None, SelectionMode::Interactive, &mut input, &mut out);
        assert!(matches!(result, Err(ScopeError::Prompt(_))));
    }

    #[test]
    fn lists_inputs_from_host() {
        let host = FakeHost::with_feed(Vec::new());
        let catalog = DeviceCatalog::list_input_devices(&host).unwrap();
        assert_eq!(catalog.devices(), &[host.input_device()]);
    }

    #[test]
    fn sample_rate_falls_back_when_query_fails() {
        let host = FakeHost::with_feed(Vec::new());
        assert_eq!(sample_rate(&host, &host.input_device(), 44_100), 48_000);

        let host = FakeHost::with_feed(Vec::new()).without_rate();
        assert_eq!(sample_rate(&host, &host.input_device(), 44_100), 44_100);
    }
}
