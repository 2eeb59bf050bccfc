/// Which slider keyboard adjustments go to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Gain,
    Smoothing,
}

impl Control {
    pub fn next(self) -> Self {
        match self {
            Control::Gain => Control::Smoothing,
            Control::Smoothing => Control::Gain,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Control::Gain => "Gain",
            Control::Smoothing => "Smoothing",
        }
    }
}

/// Messages from the keyboard → display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    SelectNext,
    SelectPrev,
    Increase,
    Decrease,
    Quit,
}

/// Messages from the display → render loop, carrying the new clamped value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlChange {
    Gain(f32),
    Smoothing(f32),
}
