//! User overrides for key bindings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keybind definition - can be single key, multiple keys, or disabled.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum KeybindDef {
    /// Single keybind
    Single(String),
    /// Multiple alternative keybinds for the same action
    Multiple(Vec<String>),
}

impl KeybindDef {
    /// The key strings, with `"none"` entries removed
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let keys = match self {
            Self::Single(key) => vec![key.clone()],
            Self::Multiple(keys) => keys.clone(),
        };
        keys.into_iter().filter(|k| k != "none").collect()
    }
}

impl From<&str> for KeybindDef {
    fn from(key: &str) -> Self {
        Self::Single(key.to_string())
    }
}

impl From<Vec<&str>> for KeybindDef {
    fn from(keys: Vec<&str>) -> Self {
        Self::Multiple(keys.into_iter().map(ToString::to_string).collect())
    }
}

/// Per-action overrides keyed by action name (`"answer"`, `"skip"`, ...)
///
/// An override replaces every default key of its action.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct KeybindOverrides {
    /// Overrides by action name
    pub keybinds: HashMap<String, KeybindDef>,
}

impl KeybindOverrides {
    /// Create an empty override set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an override
    #[must_use]
    pub fn with(mut self, action: &str, def: impl Into<KeybindDef>) -> Self {
        self.keybinds.insert(action.to_string(), def.into());
        self
    }

    /// Get the keybind(s) for a given action name.
    ///
    /// Returns `None` if the action is not overridden.
    #[must_use]
    pub fn get(&self, action: &str) -> Option<Vec<String>> {
        self.keybinds.get(action).map(KeybindDef::keys)
    }

    /// Merge `other` on top of `self`
    pub fn extend(&mut self, other: &Self) {
        self.keybinds
            .extend(other.keybinds.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Names that do not correspond to any action
    pub fn unknown_actions(&self) -> impl Iterator<Item = &str> {
        self.keybinds
            .keys()
            .map(String::as_str)
            .filter(|name| super::Action::from_name(name).is_none())
    }
}
