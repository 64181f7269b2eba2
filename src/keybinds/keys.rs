//! Physical keys and their string notation
//!
//! Keys are written the way config files spell them: `"enter"`, `"ctrl-c"`,
//! `"shift-tab"`, `"y"`. A sequence is several keys separated by spaces,
//! e.g. `"escape enter"`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// A key press with its modifiers, normalised for lookup
///
/// Character keys carry their case in the character itself, so the SHIFT
/// modifier is dropped for them. `BackTab` always means shift-tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// Key code
    pub code: KeyCode,
    /// Active modifiers
    pub modifiers: KeyModifiers,
}

impl Key {
    /// Create a normalised key
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let modifiers = match code {
            KeyCode::Char(_) | KeyCode::BackTab => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        Self { code, modifiers }
    }

    /// Key without modifiers
    #[must_use]
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Ctrl + character
    #[must_use]
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// The printable character this key inserts, if any
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&key_to_string(self))
    }
}

/// One or more keys pressed in order
pub type KeySequence = Vec<Key>;

/// Convert a key to its string notation
#[must_use]
pub fn key_to_string(key: &Key) -> String {
    let base = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "shift-tab".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        other => format!("{other:?}").to_lowercase(),
    };

    let mut result = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        result.push_str("ctrl-");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        result.push_str("alt-");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        result.push_str("shift-");
    }
    result.push_str(&base);
    result
}

/// Parse a single key like `"ctrl-t"`, `"escape"` or `"Y"`
///
/// Single characters keep their case; named keys are case-insensitive.
#[must_use]
pub fn parse_key(s: &str) -> Option<Key> {
    if s.chars().count() == 1 {
        return s.chars().next().map(|c| Key::plain(KeyCode::Char(c)));
    }
    // A lone "-" is handled above; "ctrl--" binds ctrl + minus
    let (prefix, key_part) = match s.strip_suffix("--") {
        Some(prefix) => (prefix, "-"),
        None => s.rsplit_once('-').unwrap_or(("", s)),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('-').filter(|p| !p.is_empty()) {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" | "c" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" | "m" => modifiers |= KeyModifiers::ALT,
            "shift" | "s" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let lower = key_part.to_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" | "cr" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => {
            if modifiers.contains(KeyModifiers::SHIFT) {
                KeyCode::BackTab
            } else {
                KeyCode::Tab
            }
        }
        "btab" | "backtab" => KeyCode::BackTab,
        "bspace" | "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdn" | "pagedown" => KeyCode::PageDown,
        f if f.starts_with('f') && f.len() > 1 => KeyCode::F(f[1..].parse().ok()?),
        _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
        _ => return None,
    };

    Some(Key::new(code, modifiers))
}

/// Parse a space separated key sequence like `"escape enter"`
#[must_use]
pub fn parse_sequence(s: &str) -> Option<KeySequence> {
    if s == " " {
        return Some(vec![Key::plain(KeyCode::Char(' '))]);
    }
    let keys: Option<Vec<Key>> = s.split_whitespace().map(parse_key).collect();
    keys.filter(|k| !k.is_empty())
}

/// Render a sequence back to its string notation
#[must_use]
pub fn sequence_to_string(sequence: &[Key]) -> String {
    sequence
        .iter()
        .map(key_to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
