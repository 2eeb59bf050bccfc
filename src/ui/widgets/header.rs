use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::app::SessionInfo;
use crate::ui::theme;

pub struct HeaderWidget<'a> {
    pub info: &'a SessionInfo,
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let title = " CRT AUDIO OSCILLOSCOPE ";
        buf.set_string(
            area.x,
            area.y,
            title,
            Style::default()
                .fg(theme::BG)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        );

        let details = format!(
            "  {}  ·  {} Hz  ·  {} samples",
            self.info.device_name, self.info.sample_rate, self.info.block_size
        );
        let x = area.x + title.len() as u16;
        let room = (area.x + area.width).saturating_sub(x) as usize;
        let details: String = details.chars().take(room).collect();
        buf.set_string(x, area.y, &details, Style::default().fg(theme::FG));
    }
}
