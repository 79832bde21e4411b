use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub mod bindings;
pub mod handler;

pub use bindings::{Action, Key, KeyBindings, KeyParseError};
pub use handler::{Cue, InputOutcome, handle_key_presses};

/// Global counter for unique key press IDs
static NEXT_KEY_PRESS_ID: AtomicU64 = AtomicU64::new(1);

/// A single key press delivered by the host for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// Unique ID, used to drop consumed presses from the frame's list
    pub id: u64,
    pub key: Key,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            id: NEXT_KEY_PRESS_ID.fetch_add(1, Ordering::Relaxed),
            key,
        }
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        KeyPress::new(Key::from(event))
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        // Chords must never reach text entry as plain letters
        if event.modifiers.contains(KeyModifiers::ALT) {
            return Key::Unsupported;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char(c) => Key::Ctrl(c.to_ascii_lowercase()),
                _ => Key::Unsupported,
            };
        }
        Key::from(event.code)
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Unsupported,
        }
    }
}
