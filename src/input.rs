use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::messages::UiEvent;

/// Map keyboard input to UiEvent
pub fn handle_key(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(UiEvent::Quit),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Some(UiEvent::SelectNext),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => Some(UiEvent::Increase),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => Some(UiEvent::Decrease),
        _ => None,
    }
}

/// Key labels for the hint bar
pub fn key_hints() -> Vec<(&'static str, &'static str)> {
    vec![
        ("↑/↓", "Select"),
        ("←/→", "Adjust"),
        ("Q/Esc", "Quit"),
    ]
}
