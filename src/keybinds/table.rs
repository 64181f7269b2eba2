//! Key binding table and key sequence dispatch.

use super::actions::Action;
use super::config::KeybindOverrides;
use super::keys::{Key, KeySequence, parse_sequence, sequence_to_string};
use crate::error::{PromptError, Result};
use std::fmt;

/// What a key sequence is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// A built-in action
    Action(Action),
    /// A caller supplied handler, by registration index
    Custom(usize),
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => write!(f, "'{action}'"),
            Self::Custom(index) => write!(f, "custom binding #{index}"),
        }
    }
}

/// Outcome of feeding one key into the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// A complete sequence matched
    Bound(Binding),
    /// The key is not part of any binding and goes to the editor
    Unbound(Key),
}

/// Mapping from physical key sequences to bindings
///
/// Every sequence is owned by exactly one binding; binding the same sequence
/// twice is a configuration error.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    entries: Vec<(KeySequence, Binding)>,
}

impl KeyBindings {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(action, keys)` defaults with user overrides
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] for unknown action names,
    /// unparsable keys, or a key sequence bound twice.
    pub fn from_table(table: &[(Action, Vec<String>)], overrides: &KeybindOverrides) -> Result<Self> {
        if let Some(name) = overrides.unknown_actions().next() {
            return Err(PromptError::invalid(format!("unknown key binding action '{name}'")));
        }

        let mut bindings = Self::new();
        for (action, defaults) in table {
            let keys = overrides.get(action.name()).unwrap_or_else(|| defaults.clone());
            for key in &keys {
                bindings.bind(key, Binding::Action(*action))?;
            }
        }
        Ok(bindings)
    }

    /// Bind a key sequence written in string notation
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] if the keys cannot be parsed
    /// or the sequence is already bound.
    pub fn bind(&mut self, keys: &str, binding: Binding) -> Result<()> {
        let sequence = parse_sequence(keys)
            .ok_or_else(|| PromptError::invalid(format!("cannot parse key binding '{keys}'")))?;
        self.bind_sequence(sequence, binding)
    }

    /// Bind an already parsed sequence
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] if the sequence is already bound.
    pub fn bind_sequence(&mut self, sequence: KeySequence, binding: Binding) -> Result<()> {
        if let Some(existing) = self.lookup(&sequence) {
            return Err(PromptError::invalid(format!(
                "key '{}' is bound to both {existing} and {binding}",
                sequence_to_string(&sequence)
            )));
        }
        self.entries.push((sequence, binding));
        Ok(())
    }

    /// The binding owning exactly this sequence
    #[must_use]
    pub fn lookup(&self, sequence: &[Key]) -> Option<Binding> {
        self.entries
            .iter()
            .find(|(seq, _)| seq.as_slice() == sequence)
            .map(|(_, binding)| *binding)
    }

    /// Number of bound sequences
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_strict_prefix(&self, keys: &[Key]) -> bool {
        self.entries
            .iter()
            .any(|(seq, _)| seq.len() > keys.len() && seq.starts_with(keys))
    }

    /// Feed one key, using `pending` to hold a partially typed sequence
    ///
    /// Returns nothing while the pending keys may still grow into a bound
    /// sequence. When they cannot, the longest bound prefix fires and the
    /// remaining keys are replayed one by one.
    pub fn dispatch(&self, pending: &mut Vec<Key>, key: Key) -> Vec<Dispatched> {
        pending.push(key);
        if self.is_strict_prefix(pending) {
            return Vec::new();
        }
        if let Some(binding) = self.lookup(pending) {
            pending.clear();
            return vec![Dispatched::Bound(binding)];
        }

        let keys = std::mem::take(pending);
        let (first, replay) = (1..keys.len())
            .rev()
            .find_map(|end| {
                self.lookup(&keys[..end])
                    .map(|binding| (Dispatched::Bound(binding), &keys[end..]))
            })
            .unwrap_or((Dispatched::Unbound(keys[0]), &keys[1..]));

        let mut out = vec![first];
        for key in replay {
            out.extend(self.dispatch(pending, *key));
        }
        out
    }
}
