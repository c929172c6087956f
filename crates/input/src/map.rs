//! Key mapping from terminal events to game commands.
//!
//! One key per gate kind (a/o/n/x/d/r/z), case-insensitive. Keys outside the
//! table map to nothing and are left to the host.

use crate::types::{GameCommand, GateType};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a printable character to its gate.
pub fn gate_for_char(c: char) -> Option<GateType> {
    match c.to_ascii_lowercase() {
        'a' => Some(GateType::And),
        'o' => Some(GateType::Or),
        'n' => Some(GateType::Not),
        'x' => Some(GateType::Xor),
        'd' => Some(GateType::Nand),
        'r' => Some(GateType::Nor),
        'z' => Some(GateType::Xnor),
        _ => None,
    }
}

/// Map a key event to its gate.
///
/// Control/Alt chords are never gate presses (Ctrl-D is not NAND).
pub fn gate_for_key(key: KeyEvent) -> Option<GateType> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => gate_for_char(c),
        _ => None,
    }
}

/// Map keyboard input to a game command.
pub fn handle_key_event(key: KeyEvent) -> Option<GameCommand> {
    if let Some(kind) = gate_for_key(key) {
        return Some(GameCommand::Press(kind));
    }
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameCommand::Start),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
