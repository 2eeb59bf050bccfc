pub mod layout;
pub mod terminal;
pub mod theme;
pub mod view;
pub mod widgets;

use crate::audio::block::AudioBlock;
use crate::error::ScopeError;
use crate::messages::ControlChange;

/// The window the render loop drives.
pub trait Display {
    /// False once the user has closed the window.
    fn is_open(&self) -> bool;

    /// Slider changes since the last call. Must not block.
    fn poll_controls(&mut self) -> Result<Vec<ControlChange>, ScopeError>;

    /// Replace the current trace with `block`.
    fn show_block(&mut self, block: &AudioBlock);

    /// Tell the operator about a recoverable problem; shown until replaced.
    fn show_status(&mut self, message: &str);

    fn redraw(&mut self) -> Result<(), ScopeError>;
}
