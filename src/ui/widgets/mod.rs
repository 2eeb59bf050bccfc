pub mod header;
pub mod keyboard_hint;
pub mod slider;
pub mod vu_meter;
pub mod waveform;
