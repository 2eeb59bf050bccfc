use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::audio::block::column_extents;
use crate::ui::theme;

/// Oscilloscope trace: samples in [-1, 1] drawn left to right, one
/// min/max stroke per terminal column.
pub struct WaveformWidget<'a> {
    pub samples: &'a [f32],
    pub color: Color,
}

/// Terminal row for an amplitude; +1 at the top, -1 at the bottom.
pub fn amplitude_row(area: Rect, value: f32) -> u16 {
    let span = area.height.saturating_sub(1) as f32;
    let offset = ((1.0 - value.clamp(-1.0, 1.0)) / 2.0 * span).round() as u16;
    area.y + offset.min(area.height.saturating_sub(1))
}

impl Widget for WaveformWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 3 {
            return;
        }

        // Grid: zero line plus quarter marks
        let mid_y = amplitude_row(area, 0.0);
        for x in area.x..area.x + area.width {
            buf.set_string(x, mid_y, "┄", Style::default().fg(theme::GRID));
        }
        for level in [-0.5, 0.5] {
            let y = amplitude_row(area, level);
            for x in (area.x..area.x + area.width).step_by(4) {
                buf.set_string(x, y, "·", Style::default().fg(theme::GRID));
            }
        }

        let style = Style::default().fg(self.color);
        for (i, (lo, hi)) in column_extents(self.samples, area.width as usize)
            .into_iter()
            .enumerate()
        {
            let x = area.x + i as u16;
            let top = amplitude_row(area, hi);
            let bottom = amplitude_row(area, lo);
            if top == bottom {
                buf.set_string(x, top, "─", style);
            } else {
                for y in top..=bottom {
                    buf.set_string(x, y, "│", style);
                }
            }
        }
    }
}
