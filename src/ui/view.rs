use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::AppState;
use crate::constants::{GAIN_RANGE, SMOOTHING_RANGE};
use crate::input;
use crate::messages::Control;
use crate::ui::layout::ScreenLayout;
use crate::ui::theme;
use crate::ui::widgets::header::HeaderWidget;
use crate::ui::widgets::keyboard_hint::KeyboardHintWidget;
use crate::ui::widgets::slider::SliderWidget;
use crate::ui::widgets::vu_meter::VuMeterWidget;
use crate::ui::widgets::waveform::WaveformWidget;

/// Draw the whole scope screen from `state`.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme::BG)), area);

    let layout = ScreenLayout::new(area);

    frame.render_widget(HeaderWidget { info: &state.info }, layout.header);
    frame.render_widget(
        VuMeterWidget {
            level_db: state.loudness_db,
        },
        layout.meter,
    );
    frame.render_widget(
        WaveformWidget {
            samples: &state.trace,
            color: theme::TRACE,
        },
        layout.trace,
    );
    frame.render_widget(
        SliderWidget {
            label: Control::Gain.label(),
            value: state.gain,
            min: *GAIN_RANGE.start(),
            max: *GAIN_RANGE.end(),
            selected: state.selected == Control::Gain,
        },
        layout.gain,
    );
    frame.render_widget(
        SliderWidget {
            label: Control::Smoothing.label(),
            value: state.smoothing,
            min: *SMOOTHING_RANGE.start(),
            max: *SMOOTHING_RANGE.end(),
            selected: state.selected == Control::Smoothing,
        },
        layout.smoothing,
    );
    frame.render_widget(
        KeyboardHintWidget {
            hints: input::key_hints(),
            message: state.status.as_deref(),
            dropped: state.dropped,
        },
        layout.footer,
    );
}
