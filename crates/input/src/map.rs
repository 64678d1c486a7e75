//! Key mapping from terminal events to engine intents.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    MoveLeft,
    MoveRight,
    Rotate,
    /// Held key; press and release are tracked by the handler
    SoftDrop,
}

/// Map keyboard input to a binding.
pub fn map_key(code: KeyCode) -> Option<KeyBinding> {
    match code {
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(KeyBinding::MoveLeft),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(KeyBinding::MoveRight),
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => Some(KeyBinding::Rotate),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => Some(KeyBinding::SoftDrop),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn should_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}
