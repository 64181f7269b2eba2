//! Keybind system for prompts.
//!
//! Every prompt owns a [`KeyBindings`] table mapping physical key sequences
//! to logical [`Action`]s (or caller supplied handlers). Tables are built from
//! a per-variant default list, optionally replaced per action by
//! [`KeybindOverrides`] loaded from configuration.

pub mod actions;
pub mod config;
pub mod keys;
pub mod table;

pub use actions::Action;
pub use config::{KeybindDef, KeybindOverrides};
pub use keys::{Key, KeySequence, key_to_string, parse_key, parse_sequence};
pub use table::{Binding, Dispatched, KeyBindings};
