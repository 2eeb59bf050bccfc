use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme;

/// Lowest level the meter shows; anything quieter reads as empty.
pub const METER_FLOOR_DB: f32 = -60.0;

/// Block loudness bar, scaled from METER_FLOOR_DB to 0 dBFS.
pub struct VuMeterWidget {
    pub level_db: f32,
}

impl VuMeterWidget {
    pub fn fraction(&self) -> f32 {
        ((self.level_db - METER_FLOOR_DB) / -METER_FLOOR_DB).clamp(0.0, 1.0)
    }
}

impl Widget for VuMeterWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 24 || area.height < 1 {
            return;
        }

        let label_width = 12;
        let value_width = 10;
        let bar_start = area.x + label_width;
        let bar_width = area.width.saturating_sub(label_width + value_width);

        buf.set_string(area.x, area.y, "  Loudness", Style::default().fg(theme::DIM));

        for x in bar_start..bar_start + bar_width {
            buf.set_string(x, area.y, "░", Style::default().fg(theme::GRID));
        }

        let level_width = (self.fraction() * bar_width as f32) as u16;
        for x in bar_start..bar_start + level_width.min(bar_width) {
            let frac = (x - bar_start) as f32 / bar_width as f32;
            let color = if frac < 0.6 {
                theme::VU_GREEN
            } else if frac < 0.85 {
                theme::VU_YELLOW
            } else {
                theme::VU_RED
            };
            buf.set_string(x, area.y, "█", Style::default().fg(color));
        }

        let value = if self.level_db <= METER_FLOOR_DB {
            "   -∞ dBFS".to_string()
        } else {
            format!("{:>5.1} dBFS", self.level_db)
        };
        buf.set_string(bar_start + bar_width, area.y, &value, Style::default().fg(theme::FG));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_maps_db_range() {
        assert_eq!(VuMeterWidget { level_db: 0.0 }.fraction(), 1.0);
        assert_eq!(VuMeterWidget { level_db: -30.0 }.fraction(), 0.5);
        assert_eq!(VuMeterWidget { level_db: -120.0 }.fraction(), 0.0);
    }
}
