//! Key handling for a running prompt
//!
//! [`Engine`] is the prompt side of a session loop: it renders the current
//! frame and turns dispatched key bindings into state changes. Every key is
//! handled synchronously, so the blocking and the async loops share it.

use super::kind::PromptKind;
use super::message;
use super::options::PromptOptions;
use super::status::{Answer, Status};
use crate::error::Result;
use crate::keybinds::{Action, Binding, Dispatched, Key};
use crate::session::{Driver, Frame, Session};
use crate::style::Fragment;
use crate::validation::Validation;

/// Marker in front of the highlighted choice
pub const POINTER: &str = "❯";
/// Checkbox marker for a checked choice
pub const CHECKED: &str = "◉";
/// Checkbox marker for an unchecked choice
pub const UNCHECKED: &str = "○";

/// Handler attached to a custom key binding
pub type Handler = Box<dyn FnMut(&mut Session) -> Result<()> + Send>;

/// Why the loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// An answer passed validation
    Answered(Answer),
    /// The skip key on a non-mandatory prompt
    Skipped,
    /// The interrupt key
    Interrupted,
    /// A handler called [`Session::exit`]
    Forced(Option<Answer>),
}

/// Prompt state for one run
pub struct Engine<'p> {
    kind: &'p PromptKind,
    options: &'p PromptOptions,
    status: &'p Status,
    message: &'p str,
    default: Option<&'p Answer>,
    handlers: &'p mut [Handler],
    pointer: usize,
    checked: Vec<bool>,
}

impl<'p> Engine<'p> {
    /// Start a run; list prompts begin at their default choices
    pub fn new(
        kind: &'p PromptKind,
        options: &'p PromptOptions,
        status: &'p Status,
        message: &'p str,
        default: Option<&'p Answer>,
        handlers: &'p mut [Handler],
    ) -> Self {
        let choices = kind.choices();
        let pointer = match default {
            Some(Answer::Text(value)) => choices.iter().position(|c| &c.value == value),
            _ => None,
        }
        .unwrap_or(0);
        let checked = choices
            .iter()
            .map(|choice| {
                default
                    .and_then(Answer::as_list)
                    .is_some_and(|values| values.contains(&choice.value))
            })
            .collect();

        Self {
            kind,
            options,
            status,
            message,
            default,
            handlers,
            pointer,
            checked,
        }
    }

    /// Index of the highlighted choice
    #[must_use]
    pub const fn pointer(&self) -> usize {
        self.pointer
    }

    fn checked_values(&self) -> Vec<String> {
        self.kind
            .choices()
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(choice, _)| choice.value.clone())
            .collect()
    }

    fn move_pointer(&mut self, down: bool) {
        let len = self.kind.choices().len();
        if len == 0 {
            return;
        }
        self.pointer = if down {
            (self.pointer + 1) % len
        } else {
            (self.pointer + len - 1) % len
        };
    }

    /// Commit `answer` if it validates, otherwise show the rejection
    fn submit(session: &mut Session, answer: Answer, text: &str) -> Result<Option<Exit>> {
        match session.validate_text(text)? {
            Validation::Valid => Ok(Some(Exit::Answered(answer))),
            Validation::Invalid(message) => {
                tracing::debug!(%message, "answer rejected by validator");
                session.set_error(message);
                Ok(None)
            }
        }
    }

    fn on_action(&mut self, session: &mut Session, action: Action) -> Result<Option<Exit>> {
        tracing::trace!(%action, "key action");
        match action {
            Action::Answer => self.on_answer(session),
            Action::Interrupt => Ok(Some(Exit::Interrupted)),
            Action::Skip if self.options.mandatory => {
                session.set_error(self.options.mandatory_message.clone());
                Ok(None)
            }
            Action::Skip => Ok(Some(Exit::Skipped)),
            Action::Accept => Ok(Some(Exit::Answered(Answer::Bool(true)))),
            Action::Reject => Ok(Some(Exit::Answered(Answer::Bool(false)))),
            Action::CompleteNext => {
                session.complete_next();
                Ok(None)
            }
            Action::CompletePrevious => {
                session.complete_previous();
                Ok(None)
            }
            Action::Up | Action::Down => {
                self.move_pointer(action == Action::Down);
                session.clear_error();
                Ok(None)
            }
            Action::Toggle => {
                if let Some(checked) = self.checked.get_mut(self.pointer) {
                    *checked = !*checked;
                }
                session.clear_error();
                Ok(None)
            }
            Action::ToggleAll => {
                for checked in &mut self.checked {
                    *checked = !*checked;
                }
                session.clear_error();
                Ok(None)
            }
        }
    }

    fn on_answer(&self, session: &mut Session) -> Result<Option<Exit>> {
        match self.kind {
            PromptKind::Confirm { .. } => {
                let yes = self.default.and_then(Answer::as_bool).unwrap_or(false);
                Ok(Some(Exit::Answered(Answer::Bool(yes))))
            }
            PromptKind::Input { .. } | PromptKind::Secret | PromptKind::FilePath { .. } => {
                session.close_menu();
                let text = session.buffer().text().to_string();
                Self::submit(session, Answer::Text(text.clone()), &text)
            }
            PromptKind::Select { choices } => match choices.get(self.pointer) {
                Some(choice) => {
                    Self::submit(session, Answer::Text(choice.value.clone()), &choice.value)
                }
                None => Ok(None),
            },
            PromptKind::Checkbox { .. } => {
                let values = self.checked_values();
                let text = values.join("\n");
                Self::submit(session, Answer::List(values), &text)
            }
        }
    }

    fn list_lines(&self) -> Vec<Fragment> {
        let checkbox = matches!(self.kind, PromptKind::Checkbox { .. });
        let mut fragments = Vec::new();
        for (i, choice) in self.kind.choices().iter().enumerate() {
            let current = i == self.pointer;
            fragments.push(Fragment::new("", "\n"));
            fragments.push(Fragment::new(
                "pointer",
                if current { format!("{POINTER} ") } else { "  ".to_string() },
            ));
            if checkbox {
                let marker = if self.checked.get(i).copied().unwrap_or(false) {
                    CHECKED
                } else {
                    UNCHECKED
                };
                fragments.push(Fragment::new("checkbox", format!("{marker} ")));
            }
            fragments.push(Fragment::new(
                if current { "pointer" } else { "" },
                choice.name.clone(),
            ));
        }
        fragments
    }
}

impl Driver for Engine<'_> {
    type Output = Exit;

    fn render(&self, session: &Session) -> Frame {
        let mut head = message::render(
            self.status,
            self.options,
            self.kind,
            self.message,
            self.default,
        );
        let mut tail = Vec::new();
        if self.kind.is_text() {
            let (before, after) = session.input_fragments();
            head.push(before);
            tail.push(after);
        } else {
            tail.extend(self.list_lines());
        }
        tail.extend(session.decorations());
        Frame { head, tail }
    }

    fn handle_key(&mut self, session: &mut Session, key: Key) -> Result<Option<Exit>> {
        for dispatched in session.dispatch(key) {
            let exit = match dispatched {
                Dispatched::Bound(Binding::Action(action)) => self.on_action(session, action)?,
                Dispatched::Bound(Binding::Custom(index)) => {
                    if let Some(handler) = self.handlers.get_mut(index) {
                        handler(session)?;
                    }
                    None
                }
                Dispatched::Unbound(key) => {
                    if self.kind.is_text() {
                        session.edit(key)?;
                    }
                    None
                }
            };
            if let Some(forced) = session.take_exit() {
                return Ok(Some(Exit::Forced(forced)));
            }
            if exit.is_some() {
                return Ok(exit);
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinds::{KeyBindings, KeybindOverrides};
    use crate::prompts::kind::Choice;
    use crate::session::{PipeInput, SessionOptions};
    use crate::testing::dummy;
    use crossterm::event::KeyCode;

    fn session_for(kind: &PromptKind) -> Session {
        let table = kind.default_bindings(false);
        let key_bindings = KeyBindings::from_table(&table, &KeybindOverrides::new()).unwrap();
        let options = SessionOptions {
            key_bindings,
            ..SessionOptions::default()
        };
        Session::new(options, PipeInput::new().into(), dummy().into())
    }

    fn press(engine: &mut Engine<'_>, session: &mut Session, key: Key) -> Option<Exit> {
        engine.handle_key(session, key).unwrap()
    }

    #[test]
    fn test_select_pointer_wraps() {
        let kind = PromptKind::Select {
            choices: vec![Choice::from("a"), Choice::from("b"), Choice::from("c")],
        };
        let options = PromptOptions::default();
        let status = Status::default();
        let default = Answer::from("b");
        let mut handlers: Vec<Handler> = Vec::new();
        let mut engine = Engine::new(&kind, &options, &status, "m", Some(&default), &mut handlers);
        let mut session = session_for(&kind);

        assert_eq!(engine.pointer(), 1);
        press(&mut engine, &mut session, Key::plain(KeyCode::Down));
        press(&mut engine, &mut session, Key::plain(KeyCode::Down));
        assert_eq!(engine.pointer(), 0);
        press(&mut engine, &mut session, Key::ctrl('p'));
        assert_eq!(engine.pointer(), 2);
        assert_eq!(
            press(&mut engine, &mut session, Key::plain(KeyCode::Enter)),
            Some(Exit::Answered(Answer::from("c")))
        );
    }

    #[test]
    fn test_checkbox_toggle() {
        let kind = PromptKind::Checkbox {
            choices: vec![Choice::from("a"), Choice::from("b"), Choice::from("c")],
        };
        let options = PromptOptions::default();
        let status = Status::default();
        let default = Answer::from(vec!["c"]);
        let mut handlers: Vec<Handler> = Vec::new();
        let mut engine = Engine::new(&kind, &options, &status, "m", Some(&default), &mut handlers);
        let mut session = session_for(&kind);

        press(&mut engine, &mut session, Key::plain(KeyCode::Char(' ')));
        assert_eq!(
            press(&mut engine, &mut session, Key::plain(KeyCode::Enter)),
            Some(Exit::Answered(Answer::from(vec!["a", "c"])))
        );

        press(&mut engine, &mut session, Key::ctrl('r'));
        assert_eq!(engine.checked_values(), vec!["b".to_string()]);
    }

    #[test]
    fn test_mandatory_skip_shows_message() {
        let kind = PromptKind::Secret;
        let options = PromptOptions::default();
        let status = Status::default();
        let mut handlers: Vec<Handler> = Vec::new();
        let mut engine = Engine::new(&kind, &options, &status, "m", None, &mut handlers);
        let mut session = session_for(&kind);

        assert_eq!(press(&mut engine, &mut session, Key::ctrl('z')), None);
        assert_eq!(session.error(), Some("Mandatory prompt"));
    }

    #[test]
    fn test_confirm_ignores_other_letters() {
        let kind = PromptKind::Confirm {
            confirm_letter: 'y',
            reject_letter: 'n',
        };
        let options = PromptOptions::default();
        let status = Status::default();
        let mut handlers: Vec<Handler> = Vec::new();
        let mut engine = Engine::new(&kind, &options, &status, "m", None, &mut handlers);
        let mut session = session_for(&kind);

        assert_eq!(press(&mut engine, &mut session, Key::plain(KeyCode::Char('x'))), None);
        assert!(session.buffer().is_empty());
        assert_eq!(
            press(&mut engine, &mut session, Key::plain(KeyCode::Char('N'))),
            Some(Exit::Answered(Answer::Bool(false)))
        );
    }

    #[test]
    fn test_render_list() {
        let kind = PromptKind::Checkbox {
            choices: vec![Choice::new("Apple", "a"), Choice::new("Pear", "p")],
        };
        let options = PromptOptions::default();
        let status = Status::default();
        let default = Answer::from(vec!["p"]);
        let mut handlers: Vec<Handler> = Vec::new();
        let engine = Engine::new(&kind, &options, &status, "fruit", Some(&default), &mut handlers);
        let session = session_for(&kind);

        assert_eq!(
            engine.render(&session).plain(),
            "? fruit \n❯ ○ Apple\n  ◉ Pear"
        );
    }
}
