//! Fakes for the display and settings seams.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::app::SessionInfo;
use crate::audio::block::AudioBlock;
use crate::error::ScopeError;
use crate::messages::ControlChange;
use crate::settings::{Settings, SettingsSink};
use crate::ui::Display;

/// Records every persist call; `failing` makes each one report a write error.
#[derive(Default)]
pub struct RecordingSink {
    pub saved: Vec<Settings>,
    pub failing: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

impl SettingsSink for RecordingSink {
    fn persist(&mut self, settings: &Settings) -> Result<(), ScopeError> {
        self.saved.push(*settings);
        if self.failing {
            return Err(ScopeError::Io(std::io::Error::other("disk full")));
        }
        Ok(())
    }
}

/// What a ScriptedDisplay saw, readable after it has been moved away.
#[derive(Default)]
pub struct DisplayLog {
    pub info: Option<SessionInfo>,
    pub shown: Vec<AudioBlock>,
    pub statuses: Vec<String>,
    pub redraws: usize,
    pub polls: usize,
}

/// Stays open for a fixed number of polls, replaying one batch of control
/// changes per poll.
pub struct ScriptedDisplay {
    log: Rc<RefCell<DisplayLog>>,
    polls_left: usize,
    controls: VecDeque<Vec<ControlChange>>,
    pub fail_polls: bool,
}

impl ScriptedDisplay {
    pub fn new(polls: usize, controls: Vec<Vec<ControlChange>>) -> (Self, Rc<RefCell<DisplayLog>>) {
        let log = Rc::new(RefCell::new(DisplayLog::default()));
        (
            Self {
                log: Rc::clone(&log),
                polls_left: polls,
                controls: controls.into(),
                fail_polls: false,
            },
            log,
        )
    }

    pub fn opened(polls: usize, info: SessionInfo, log: &Rc<RefCell<DisplayLog>>) -> Self {
        log.borrow_mut().info = Some(info);
        Self {
            log: Rc::clone(log),
            polls_left: polls,
            controls: VecDeque::new(),
            fail_polls: false,
        }
    }

    pub fn push_controls(&mut self, changes: Vec<ControlChange>) {
        self.controls.push_back(changes);
    }
}

impl Display for ScriptedDisplay {
    fn is_open(&self) -> bool {
        self.polls_left > 0
    }

    fn poll_controls(&mut self) -> Result<Vec<ControlChange>, ScopeError> {
        if self.fail_polls {
            return Err(ScopeError::Terminal("terminal went away".to_string()));
        }
        self.polls_left = self.polls_left.saturating_sub(1);
        self.log.borrow_mut().polls += 1;
        Ok(self.controls.pop_front().unwrap_or_default())
    }

    fn show_block(&mut self, block: &AudioBlock) {
        self.log.borrow_mut().shown.push(block.clone());
    }

    fn show_status(&mut self, message: &str) {
        self.log.borrow_mut().statuses.push(message.to_string());
    }

    fn redraw(&mut self) -> Result<(), ScopeError> {
        self.log.borrow_mut().redraws += 1;
        Ok(())
    }
}
