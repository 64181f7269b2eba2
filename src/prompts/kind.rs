//! Prompt variants and their default key tables

use super::status::Answer;
use crate::completions::{Completer, FilePathCompleter};
use crate::error::{PromptError, Result};
use crate::keybinds::Action;
use std::fmt;
use std::sync::Arc;

/// Instruction shown by multiline input prompts
pub const MULTILINE_INSTRUCTION: &str = "ESC + Enter to finish input";

/// One entry of a select or checkbox prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Text shown in the list
    pub name: String,
    /// Value returned when chosen
    pub value: String,
}

impl Choice {
    /// Choice showing `name` and returning `value`
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        Self::new(value.clone(), value)
    }
}

/// What a prompt asks for
#[derive(Clone)]
pub enum PromptKind {
    /// Yes/no question answered by a single letter or Enter
    Confirm {
        /// Letter answering yes, either case
        confirm_letter: char,
        /// Letter answering no, either case
        reject_letter: char,
    },
    /// Free text, optionally completed and multiline
    Input {
        /// Completion source
        completer: Option<Arc<dyn Completer>>,
        /// Enter inserts newlines; `escape enter` submits
        multiline: bool,
    },
    /// Masked text
    Secret,
    /// File system path with path completion
    FilePath {
        /// Path completer
        completer: Arc<FilePathCompleter>,
    },
    /// Pick one choice
    Select {
        /// Available choices
        choices: Vec<Choice>,
    },
    /// Pick any number of choices
    Checkbox {
        /// Available choices
        choices: Vec<Choice>,
    },
}

impl fmt::Debug for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirm {
                confirm_letter,
                reject_letter,
            } => f
                .debug_struct("Confirm")
                .field("confirm_letter", confirm_letter)
                .field("reject_letter", reject_letter)
                .finish(),
            Self::Input {
                completer,
                multiline,
            } => f
                .debug_struct("Input")
                .field("completer", &completer.is_some())
                .field("multiline", multiline)
                .finish(),
            Self::Secret => f.write_str("Secret"),
            Self::FilePath { completer } => {
                f.debug_struct("FilePath").field("completer", completer).finish()
            }
            Self::Select { choices } => f.debug_struct("Select").field("choices", choices).finish(),
            Self::Checkbox { choices } => {
                f.debug_struct("Checkbox").field("choices", choices).finish()
            }
        }
    }
}

impl PromptKind {
    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Confirm { .. } => "confirm",
            Self::Input { .. } => "input",
            Self::Secret => "secret",
            Self::FilePath { .. } => "filepath",
            Self::Select { .. } => "select",
            Self::Checkbox { .. } => "checkbox",
        }
    }

    /// Whether the prompt edits a line of text
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Input { .. } | Self::Secret | Self::FilePath { .. })
    }

    /// Whether Enter inserts newlines
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        matches!(self, Self::Input { multiline: true, .. })
    }

    /// Choices of list prompts
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        match self {
            Self::Select { choices } | Self::Checkbox { choices } => choices,
            _ => &[],
        }
    }

    /// Completer consulted by the completion keys
    #[must_use]
    pub fn completer(&self) -> Option<Arc<dyn Completer>> {
        match self {
            Self::Input { completer, .. } => completer.clone(),
            Self::FilePath { completer } => Some(completer.clone() as Arc<dyn Completer>),
            _ => None,
        }
    }

    /// Check the variant's own arguments
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] for clashing confirm letters
    /// or an empty choice list.
    pub fn check(&self) -> Result<()> {
        match self {
            Self::Confirm {
                confirm_letter,
                reject_letter,
            } => {
                if confirm_letter.to_lowercase().eq(reject_letter.to_lowercase()) {
                    return Err(PromptError::invalid(format!(
                        "confirm_letter and reject_letter are both '{confirm_letter}'"
                    )));
                }
                if confirm_letter.is_control() || reject_letter.is_control() {
                    return Err(PromptError::invalid("confirm letters must be printable"));
                }
                Ok(())
            }
            Self::Select { choices } | Self::Checkbox { choices } if choices.is_empty() => {
                Err(PromptError::invalid(format!("{} prompt needs at least one choice", self.name())))
            }
            _ => Ok(()),
        }
    }

    /// Check that `default` fits this variant
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] for a default of the wrong
    /// type or naming an unknown choice.
    pub fn check_default(&self, default: &Answer) -> Result<()> {
        let wrong_type = || {
            PromptError::invalid(format!(
                "{} prompt default should not be of type {}",
                self.name(),
                default.type_name()
            ))
        };
        let unknown = |value: &str| {
            PromptError::invalid(format!("default '{value}' is not one of the choices"))
        };

        match (self, default) {
            (Self::Confirm { .. }, Answer::Bool(_)) => Ok(()),
            (Self::Input { .. } | Self::Secret | Self::FilePath { .. }, Answer::Text(_)) => Ok(()),
            (Self::Select { choices }, Answer::Text(value)) => {
                if choices.iter().any(|c| &c.value == value) {
                    Ok(())
                } else {
                    Err(unknown(value))
                }
            }
            (Self::Checkbox { choices }, Answer::List(values)) => values
                .iter()
                .find(|v| !choices.iter().any(|c| &c.value == *v))
                .map_or(Ok(()), |v| Err(unknown(v))),
            _ => Err(wrong_type()),
        }
    }

    /// Instruction shown when none is configured
    #[must_use]
    pub fn default_instruction(&self, default: Option<&Answer>) -> String {
        match self {
            Self::Confirm {
                confirm_letter,
                reject_letter,
            } => {
                let yes = default.and_then(Answer::as_bool).unwrap_or(false);
                let (accept, reject) = if yes {
                    (upper(*confirm_letter), reject_letter.to_string())
                } else {
                    (confirm_letter.to_string(), upper(*reject_letter))
                };
                format!("({accept}/{reject})")
            }
            Self::Input { multiline: true, .. } => MULTILINE_INSTRUCTION.to_string(),
            _ => String::new(),
        }
    }

    /// Default `(action, keys)` table for this variant
    #[must_use]
    pub fn default_bindings(&self, vi_mode: bool) -> Vec<(Action, Vec<String>)> {
        let answer = if self.is_multiline() { "escape enter" } else { "enter" };
        let mut table = vec![
            (Action::Answer, keys(&[answer])),
            (Action::Interrupt, keys(&["ctrl-c"])),
            (Action::Skip, keys(&["ctrl-z"])),
        ];

        match self {
            Self::Confirm {
                confirm_letter,
                reject_letter,
            } => {
                table.push((Action::Accept, letter_keys(*confirm_letter)));
                table.push((Action::Reject, letter_keys(*reject_letter)));
            }
            Self::Input { .. } | Self::FilePath { .. } => {
                table.push((Action::CompleteNext, keys(&["tab"])));
                table.push((Action::CompletePrevious, keys(&["shift-tab"])));
            }
            Self::Secret => {}
            Self::Select { .. } | Self::Checkbox { .. } => {
                let (mut up, mut down) = (keys(&["up", "ctrl-p"]), keys(&["down", "ctrl-n"]));
                if vi_mode {
                    up.push("k".to_string());
                    down.push("j".to_string());
                }
                table.push((Action::Up, up));
                table.push((Action::Down, down));
                if matches!(self, Self::Checkbox { .. }) {
                    table.push((Action::Toggle, keys(&["space"])));
                    table.push((Action::ToggleAll, keys(&["ctrl-r", "alt-r"])));
                }
            }
        }
        table
    }
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn lower(c: char) -> String {
    c.to_lowercase().collect()
}

fn upper(c: char) -> String {
    c.to_uppercase().collect()
}

/// Both cases of a letter, once when they coincide
fn letter_keys(c: char) -> Vec<String> {
    let (lower, upper) = (lower(c), upper(c));
    if lower == upper {
        vec![lower]
    } else {
        vec![lower, upper]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirm(yes: char, no: char) -> PromptKind {
        PromptKind::Confirm {
            confirm_letter: yes,
            reject_letter: no,
        }
    }

    fn select(choices: &[&str]) -> PromptKind {
        PromptKind::Select {
            choices: choices.iter().map(|c| Choice::from(*c)).collect(),
        }
    }

    #[test]
    fn test_confirm_instruction() {
        let kind = confirm('y', 'n');
        assert_eq!(kind.default_instruction(Some(&Answer::Bool(true))), "(Y/n)");
        assert_eq!(kind.default_instruction(Some(&Answer::Bool(false))), "(y/N)");
        assert_eq!(kind.default_instruction(None), "(y/N)");
        assert_eq!(
            confirm('W', 'n').default_instruction(Some(&Answer::Bool(true))),
            "(W/n)"
        );
        assert_eq!(
            confirm('W', 'n').default_instruction(Some(&Answer::Bool(false))),
            "(W/N)"
        );
    }

    #[test]
    fn test_confirm_letters_must_differ() {
        assert!(confirm('y', 'Y').check().is_err());
        assert!(confirm('s', 'n').check().is_ok());
    }

    #[test]
    fn test_empty_choices_rejected() {
        assert!(matches!(select(&[]).check(), Err(PromptError::InvalidArgument(_))));
    }

    #[test]
    fn test_check_default() {
        assert!(confirm('y', 'n').check_default(&Answer::Bool(true)).is_ok());
        assert!(confirm('y', 'n').check_default(&Answer::from("yes")).is_err());
        assert!(PromptKind::Secret.check_default(&Answer::from("pw")).is_ok());
        assert!(PromptKind::Secret.check_default(&Answer::Bool(true)).is_err());

        let kind = select(&["a", "b"]);
        assert!(kind.check_default(&Answer::from("b")).is_ok());
        assert!(kind.check_default(&Answer::from("c")).is_err());

        let kind = PromptKind::Checkbox {
            choices: vec!["a".into(), "b".into()],
        };
        assert!(kind.check_default(&Answer::from(vec!["a"])).is_ok());
        assert!(kind.check_default(&Answer::from(vec!["a", "z"])).is_err());
    }

    #[test]
    fn test_default_bindings() {
        let table = confirm('y', 'n').default_bindings(false);
        assert!(table.contains(&(Action::Accept, keys(&["y", "Y"]))));
        assert!(table.contains(&(Action::Answer, keys(&["enter"]))));

        let multiline = PromptKind::Input {
            completer: None,
            multiline: true,
        };
        assert!(multiline
            .default_bindings(false)
            .contains(&(Action::Answer, keys(&["escape enter"]))));

        let vi = select(&["a"]).default_bindings(true);
        assert!(vi.contains(&(Action::Down, keys(&["down", "ctrl-n", "j"]))));
        assert!(!vi.iter().any(|(a, _)| *a == Action::Toggle));
    }

    #[test]
    fn test_letter_keys_for_symbols() {
        assert_eq!(letter_keys('1'), vec!["1".to_string()]);
    }

    #[test]
    fn test_multiline_instruction() {
        let kind = PromptKind::Input {
            completer: None,
            multiline: true,
        };
        assert_eq!(kind.default_instruction(None), MULTILINE_INSTRUCTION);
        assert_eq!(PromptKind::Secret.default_instruction(None), "");
    }
}
