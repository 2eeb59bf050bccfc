use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::debug;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::{AppState, SessionInfo};
use crate::audio::block::AudioBlock;
use crate::audio::queue::DropCounter;
use crate::error::ScopeError;
use crate::input;
use crate::logging;
use crate::messages::ControlChange;
use crate::settings::Settings;
use crate::ui::{view, Display};

fn term_err(e: io::Error) -> ScopeError {
    ScopeError::Terminal(e.to_string())
}

/// Full-screen crossterm display. The terminal is restored on drop, so
/// every exit path leaves the shell usable.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: AppState,
    dropped: DropCounter,
}

impl TerminalDisplay {
    pub fn open(info: SessionInfo, settings: &Settings, dropped: DropCounter) -> Result<Self, ScopeError> {
        enable_raw_mode().map_err(term_err)?;
        if let Err(e) = io::stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(term_err(e));
        }

        let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = io::stdout().execute(LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(term_err(e));
            }
        };

        logging::mute_console(true);
        let mut display = Self {
            terminal,
            state: AppState::new(info, settings),
            dropped,
        };
        display.terminal.clear().map_err(term_err)?;
        display.terminal.hide_cursor().map_err(term_err)?;
        display.redraw()?;
        Ok(display)
    }
}

impl Display for TerminalDisplay {
    fn is_open(&self) -> bool {
        !self.state.should_quit
    }

    fn poll_controls(&mut self) -> Result<Vec<ControlChange>, ScopeError> {
        let mut changes = Vec::new();
        let mut dirty = false;

        while event::poll(Duration::ZERO).map_err(term_err)? {
            match event::read().map_err(term_err)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(evt) = input::handle_key(key) {
                        debug!("Key event: {:?}", evt);
                        changes.extend(self.state.handle_event(evt));
                        dirty = true;
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if dirty && self.is_open() {
            self.redraw()?;
        }
        Ok(changes)
    }

    fn show_block(&mut self, block: &AudioBlock) {
        self.state.show_block(block);
    }

    fn show_status(&mut self, message: &str) {
        self.state.show_status(message);
    }

    fn redraw(&mut self) -> Result<(), ScopeError> {
        self.state.dropped = self.dropped.get();
        let state = &self.state;
        self.terminal
            .draw(|frame| view::render(state, frame))
            .map_err(term_err)?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
        logging::mute_console(false);
    }
}
