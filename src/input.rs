//! Input mapping
//!
//! Raw keys become frame-scoped intents here. The mapping is a pure
//! function; the simulation decides what an intent does.

use serde::{Deserialize, Serialize};

/// Backend-independent key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Esc,
    Char(char),
    Other,
}

/// A decoded player action for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Stop,
    Fire,
    PauseToggle,
    Quit,
    Restart,
    None,
}

/// Translate one key into an intent
pub fn map_key(key: KeyCode) -> Intent {
    match key {
        KeyCode::Left => Intent::MoveLeft,
        KeyCode::Right => Intent::MoveRight,
        KeyCode::Down => Intent::Stop,
        KeyCode::Space => Intent::Fire,
        KeyCode::Esc => Intent::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Intent::MoveLeft,
            'd' => Intent::MoveRight,
            's' => Intent::Stop,
            ' ' => Intent::Fire,
            'p' => Intent::PauseToggle,
            'q' | 'x' => Intent::Quit,
            'r' => Intent::Restart,
            _ => Intent::None,
        },
        KeyCode::Up | KeyCode::Enter | KeyCode::Other => Intent::None,
    }
}

/// Map a drained batch of keys, dropping the ones that mean nothing
pub fn map_keys(keys: impl IntoIterator<Item = KeyCode>) -> Vec<Intent> {
    keys.into_iter()
        .map(map_key)
        .filter(|intent| *intent != Intent::None)
        .collect()
}
