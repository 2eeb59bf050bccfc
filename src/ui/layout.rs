use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout regions
pub struct ScreenLayout {
    pub header: Rect,
    pub meter: Rect,
    pub trace: Rect,
    pub gain: Rect,
    pub smoothing: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title, device, rate
                Constraint::Length(1), // Loudness meter
                Constraint::Min(6),    // Oscilloscope trace
                Constraint::Length(1), // Gain slider
                Constraint::Length(1), // Smoothing slider
                Constraint::Length(1), // Key hints + status
            ])
            .split(area);

        Self {
            header: chunks[0],
            meter: chunks[1],
            trace: chunks[2],
            gain: chunks[3],
            smoothing: chunks[4],
            footer: chunks[5],
        }
    }
}
