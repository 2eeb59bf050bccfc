use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme;

/// Horizontal slider: label, filled bar, numeric value.
pub struct SliderWidget {
    pub label: &'static str,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub selected: bool,
}

impl SliderWidget {
    /// Position of the value within the range, 0.0 - 1.0
    pub fn fraction(&self) -> f32 {
        if self.max <= self.min {
            return 0.0;
        }
        ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

impl Widget for SliderWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 24 || area.height < 1 {
            return;
        }

        let label_width = 12;
        let value_width = 8;
        let bar_start = area.x + label_width;
        let bar_width = area.width.saturating_sub(label_width + value_width);

        let (marker, color) = if self.selected {
            ("▶", theme::ACCENT)
        } else {
            (" ", theme::FG)
        };
        let label = format!("{} {:<10}", marker, self.label);
        let label_style = if self.selected {
            Style::default().fg(color).bg(theme::SELECTED_BG)
        } else {
            Style::default().fg(color)
        };
        buf.set_string(area.x, area.y, &label, label_style);

        let filled = (self.fraction() * bar_width as f32).round() as u16;
        for x in bar_start..bar_start + bar_width {
            let (ch, fg) = if x - bar_start < filled {
                ("━", color)
            } else {
                ("─", theme::DIM)
            };
            buf.set_string(x, area.y, ch, Style::default().fg(fg));
        }

        let value = format!(" {:>6.2}", self.value);
        buf.set_string(bar_start + bar_width, area.y, &value, Style::default().fg(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(value: f32) -> SliderWidget {
        SliderWidget {
            label: "Gain",
            value,
            min: 0.5,
            max: 50.0,
            selected: true,
        }
    }

    #[test]
    fn fraction_tracks_range() {
        assert_eq!(slider(0.5).fraction(), 0.0);
        assert_eq!(slider(50.0).fraction(), 1.0);
        assert_eq!(slider(99.0).fraction(), 1.0);
    }

    #[test]
    fn renders_value_text() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        slider(2.5).render(area, &mut buf);
        let line: String = (0..40).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.contains("Gain"));
        assert!(line.trim_end().ends_with("2.50"));
    }
}
