//! Key bindings
//!
//! One flat table; the player has a single screen and no input modes.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the user asked the player to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    TogglePlayPause,
    NextVideo,
    PreviousVideo,
    SeekBackward,
    SeekForward,
    CycleRate,
    ToggleVolume,
    Refresh,
    CursorUp,
    CursorDown,
    PlaySelected,
    Quit,
}

/// Map a terminal key event to a player intent
pub fn map_key(key: KeyEvent) -> Option<PlayerIntent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(PlayerIntent::Quit);
    }

    match key.code {
        KeyCode::Char(' ') => Some(PlayerIntent::TogglePlayPause),
        KeyCode::Char('n') => Some(PlayerIntent::NextVideo),
        KeyCode::Char('p') => Some(PlayerIntent::PreviousVideo),
        KeyCode::Left => Some(PlayerIntent::SeekBackward),
        KeyCode::Right => Some(PlayerIntent::SeekForward),
        KeyCode::Char('x') => Some(PlayerIntent::CycleRate),
        KeyCode::Char('m') => Some(PlayerIntent::ToggleVolume),
        KeyCode::Char('r') => Some(PlayerIntent::Refresh),
        KeyCode::Up => Some(PlayerIntent::CursorUp),
        KeyCode::Down => Some(PlayerIntent::CursorDown),
        KeyCode::Enter => Some(PlayerIntent::PlaySelected),
        KeyCode::Char('q') => Some(PlayerIntent::Quit),
        _ => None,
    }
}
