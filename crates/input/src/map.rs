//! Key mapping from terminal events to game actions.
//!
//! Arrows, vi keys (`hjkl`) and `wasd` are interchangeable; letters match in
//! either case. Ctrl chords are reserved for the terminal and never play.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Char(c) => action_for_char(c.to_ascii_lowercase()),
        _ => None,
    }
}

fn action_for_char(c: char) -> Option<GameAction> {
    match c {
        'h' | 'a' => Some(GameAction::MoveLeft),
        'l' | 'd' => Some(GameAction::MoveRight),
        'j' | 's' => Some(GameAction::SoftDrop),
        'k' | 'w' => Some(GameAction::Rotate),
        ' ' => Some(GameAction::HardDrop),
        'r' => Some(GameAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => c == 'c',
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}
