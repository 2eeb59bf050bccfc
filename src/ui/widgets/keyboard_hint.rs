use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme;

/// Key hints (or the latest problem, when there is one) on the left,
/// dropped-block count on the right.
pub struct KeyboardHintWidget<'a> {
    pub hints: Vec<(&'static str, &'static str)>,
    pub message: Option<&'a str>,
    pub dropped: u64,
}

impl Widget for KeyboardHintWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let status = format!("dropped {} ", self.dropped);
        let status_color = if self.dropped > 0 { theme::WARN } else { theme::DIM };
        let status_x = (area.x + area.width).saturating_sub(status.len() as u16);
        let hints_end = status_x.saturating_sub(1);

        if let Some(message) = self.message {
            let width = hints_end.saturating_sub(area.x + 1) as usize;
            let shown: String = format!("! {}", message).chars().take(width).collect();
            buf.set_string(area.x + 1, area.y, shown, Style::default().fg(theme::VU_RED));
        } else {
            let mut x = area.x + 1;
            for (key, desc) in &self.hints {
                let width = (key.chars().count() + desc.len() + 3) as u16;
                if x + width > hints_end {
                    break;
                }
                buf.set_string(x, area.y, key, Style::default().fg(theme::ACCENT));
                x += key.chars().count() as u16;
                buf.set_string(x, area.y, ":", Style::default().fg(theme::DIM));
                x += 1;
                buf.set_string(x, area.y, desc, Style::default().fg(theme::FG));
                x += desc.len() as u16 + 2;
            }
        }

        if status_x > area.x {
            buf.set_string(status_x, area.y, &status, Style::default().fg(status_color));
        }
    }
}
