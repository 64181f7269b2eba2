//! Logical actions that key bindings trigger.

use std::fmt;

/// Actions a key sequence can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Submit the current answer - Enter
    Answer,
    /// Abort the prompt - Ctrl+C
    Interrupt,
    /// Skip a non-mandatory prompt - Ctrl+Z
    Skip,

    /// Confirm prompt: answer yes - accept letter
    Accept,
    /// Confirm prompt: answer no - reject letter
    Reject,

    /// Open the completion menu or select the next candidate - Tab
    CompleteNext,
    /// Select the previous completion candidate - Shift+Tab
    CompletePrevious,

    /// Move the list pointer up - Up
    Up,
    /// Move the list pointer down - Down
    Down,
    /// Toggle the highlighted choice - Space
    Toggle,
    /// Toggle every choice - Ctrl+R
    ToggleAll,
}

impl Action {
    /// Every action, in table order
    pub const ALL: [Self; 11] = [
        Self::Answer,
        Self::Interrupt,
        Self::Skip,
        Self::Accept,
        Self::Reject,
        Self::CompleteNext,
        Self::CompletePrevious,
        Self::Up,
        Self::Down,
        Self::Toggle,
        Self::ToggleAll,
    ];

    /// Name used in configuration files
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Answer => "answer",
            Self::Interrupt => "interrupt",
            Self::Skip => "skip",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::CompleteNext => "complete_next",
            Self::CompletePrevious => "complete_previous",
            Self::Up => "up",
            Self::Down => "down",
            Self::Toggle => "toggle",
            Self::ToggleAll => "toggle_all",
        }
    }

    /// Look up an action by its configuration name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
