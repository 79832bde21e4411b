//! Physical keys, logical actions and the lookup between them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::filter::Category;

/// A physical key, as far as the combat log cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    /// A character key pressed with Ctrl held, stored lowercase
    Ctrl(char),
    /// Anything the viewer has no name for (function keys, media keys, ...)
    Unsupported,
}

impl Key {
    /// Keys that append to the filter text while typing
    pub fn is_text_entry(self) -> bool {
        matches!(self, Key::Char(c) if c.is_ascii_alphabetic() || c == ' ')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key name")]
    Empty,
    #[error("unknown key name '{0}'")]
    Unknown(String),
}

impl Key {
    /// Short on-screen label; arrows are drawn as glyphs
    pub fn label(self) -> String {
        match self {
            Key::Up => "↑".to_string(),
            Key::Down => "↓".to_string(),
            Key::Left => "←".to_string(),
            Key::Right => "→".to_string(),
            other => other.to_string(),
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => return Err(KeyParseError::Empty),
            (Some(c), None) => return Ok(Key::Char(c)),
            _ => {}
        }

        let lower = s.to_lowercase();
        if let Some(rest) = lower.strip_prefix("ctrl+") {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Key::Ctrl(c)),
                _ => Err(KeyParseError::Unknown(s.to_string())),
            };
        }

        match lower.as_str() {
            "space" => Ok(Key::Char(' ')),
            "enter" | "return" => Ok(Key::Enter),
            "esc" | "escape" => Ok(Key::Esc),
            "backspace" => Ok(Key::Backspace),
            "tab" => Ok(Key::Tab),
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            "pageup" => Ok(Key::PageUp),
            "pagedown" => Ok(Key::PageDown),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            _ => Err(KeyParseError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.write_str("space"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Enter => f.write_str("enter"),
            Key::Esc => f.write_str("esc"),
            Key::Backspace => f.write_str("backspace"),
            Key::Tab => f.write_str("tab"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::PageUp => f.write_str("pageup"),
            Key::PageDown => f.write_str("pagedown"),
            Key::Home => f.write_str("home"),
            Key::End => f.write_str("end"),
            Key::Ctrl(c) => write!(f, "ctrl+{}", c),
            Key::Unsupported => f.write_str("unsupported"),
        }
    }
}

/// Logical actions that can be mapped to configurable key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Enter or leave filter text entry. Default: /
    ToggleSearch,
    /// Leave text entry keeping the text. Default: Enter
    Confirm,
    /// Leave text entry and clear the text. Default: Esc
    Abort,
    /// Delete the last typed character. Default: Backspace
    Backspace,
    /// Clear text and category filters. Default: r
    Reset,
    /// Toggle one category filter. Defaults: w, a, e
    ToggleCategory(Category),

    // Host navigation
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    PrevTurn,
    NextTurn,
    PrevLevel,
    NextLevel,
    Close,
}

impl Action {
    pub const ALL: [Action; 17] = [
        Action::ToggleSearch,
        Action::Confirm,
        Action::Abort,
        Action::Backspace,
        Action::Reset,
        Action::ToggleCategory(Category::Wizard),
        Action::ToggleCategory(Category::Ally),
        Action::ToggleCategory(Category::Enemy),
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::PrevTurn,
        Action::NextTurn,
        Action::PrevLevel,
        Action::NextLevel,
        Action::Close,
    ];

    /// Name used in the `[keys]` config table
    pub fn name(self) -> &'static str {
        match self {
            Action::ToggleSearch => "toggle_search",
            Action::Confirm => "confirm",
            Action::Abort => "abort",
            Action::Backspace => "backspace",
            Action::Reset => "reset",
            Action::ToggleCategory(Category::Wizard) => "toggle_wizard",
            Action::ToggleCategory(Category::Ally) => "toggle_ally",
            Action::ToggleCategory(Category::Enemy) => "toggle_enemy",
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::PrevTurn => "prev_turn",
            Action::NextTurn => "next_turn",
            Action::PrevLevel => "prev_level",
            Action::NextLevel => "next_level",
            Action::Close => "close",
        }
    }

    /// Actions that are checked before text entry while typing, so they
    /// must never be bound to a letter or space
    pub fn shadows_text_entry(self) -> bool {
        matches!(
            self,
            Action::ToggleSearch | Action::Confirm | Action::Abort | Action::Backspace
        )
    }

    fn default_keys(self) -> Vec<Key> {
        match self {
            Action::ToggleSearch => vec![Key::Char('/')],
            Action::Confirm => vec![Key::Enter],
            Action::Abort => vec![Key::Esc],
            Action::Backspace => vec![Key::Backspace],
            Action::Reset => vec![Key::Char('r')],
            Action::ToggleCategory(Category::Wizard) => vec![Key::Char('w')],
            Action::ToggleCategory(Category::Ally) => vec![Key::Char('a')],
            Action::ToggleCategory(Category::Enemy) => vec![Key::Char('e')],
            Action::ScrollUp => vec![Key::Up, Key::Char('k')],
            Action::ScrollDown => vec![Key::Down, Key::Char('j')],
            Action::PageUp => vec![Key::PageUp],
            Action::PageDown => vec![Key::PageDown],
            Action::PrevTurn => vec![Key::Left, Key::Char('h')],
            Action::NextTurn => vec![Key::Right, Key::Char('l')],
            Action::PrevLevel => vec![Key::Char('[')],
            Action::NextLevel => vec![Key::Char(']')],
            Action::Close => vec![Key::Char('q'), Key::Esc, Key::Ctrl('c')],
        }
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown key binding action '{}'", s))
    }
}

/// Maps each action to the set of keys that trigger it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: HashMap<Action, Vec<Key>>,
}

impl KeyBindings {
    /// Build bindings from the `[keys]` config table, falling back to the
    /// defaults for every action the table does not mention.
    pub fn from_overrides(overrides: &BTreeMap<String, Vec<String>>) -> anyhow::Result<Self> {
        let mut bindings = Self::default();
        for (name, keys) in overrides {
            let action: Action = name.parse()?;
            let keys = keys
                .iter()
                .map(|k| {
                    k.parse::<Key>()
                        .map_err(|e| anyhow::anyhow!("Key binding '{}': {}", name, e))
                })
                .collect::<anyhow::Result<Vec<Key>>>()?;

            if action.shadows_text_entry() {
                if let Some(key) = keys.iter().find(|k| k.is_text_entry()) {
                    anyhow::bail!(
                        "Key binding '{}' cannot use '{}', it is needed for typing the filter",
                        name,
                        key
                    );
                }
            }
            bindings.bindings.insert(action, keys);
        }
        Ok(bindings)
    }

    pub fn keys(&self, action: Action) -> &[Key] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn matches(&self, action: Action, key: Key) -> bool {
        self.keys(action).contains(&key)
    }

    /// The category toggled by `key`, if any
    pub fn category_for(&self, key: Key) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.matches(Action::ToggleCategory(*c), key))
    }

    /// First bound key for an action, for on-screen hints
    pub fn hint(&self, action: Action) -> String {
        self.keys(action)
            .first()
            .map(|k| k.label())
            .unwrap_or_else(|| "-".to_string())
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = Action::ALL
            .into_iter()
            .map(|a| (a, a.default_keys()))
            .collect();
        Self { bindings }
    }
}
