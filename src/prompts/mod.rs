//! Prompt engine
//!
//! A [`Prompt`] is built once through a [`PromptBuilder`], which checks every
//! argument up front, and can then be executed any number of times:
//!
//! ```no_run
//! use askr::Prompt;
//!
//! # fn main() -> askr::Result<()> {
//! let mut prompt = Prompt::confirm("Deploy now?").default(true).build()?;
//! if let Some(answer) = prompt.execute()? {
//!     println!("{answer}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Each run resolves the message and default, pre-fills the session, runs
//! the key loop (blocking or async) and records the outcome in
//! [`Prompt::status`].

pub mod engine;
pub mod kind;
pub mod message;
pub mod options;
pub mod resolve;
pub mod status;

pub use engine::{Engine, Exit, Handler};
pub use kind::{Choice, PromptKind};
pub use message::render;
pub use options::{Filter, PromptOptions, Transformer};
pub use resolve::{Resolvable, SessionResult};
pub use status::{Answer, Status};

use crate::completions::{CompleteStyle, Completer, FilePathCompleter};
use crate::config::AskrConfig;
use crate::error::{PromptError, Result};
use crate::keybinds::{Binding, KeyBindings, KeybindOverrides};
use crate::session::{EditingMode, InputDevice, OutputDevice, Session, SessionOptions};
use crate::style::{Fragment, Style};
use crate::validation::{DEFAULT_INVALID_MESSAGE, Validate};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// A built, runnable prompt
pub struct Prompt {
    message: Resolvable<String>,
    default: Option<Resolvable<Answer>>,
    kind: PromptKind,
    options: PromptOptions,
    key_bindings: KeyBindings,
    handlers: Vec<Handler>,
    status: Status,
    input: InputDevice,
    output: OutputDevice,
    resolved: Option<(String, Option<Answer>)>,
}

impl fmt::Debug for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prompt")
            .field("message", &self.message)
            .field("default", &self.default)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .field("handlers", &self.handlers.len())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Prompt {
    /// Yes/no question
    pub fn confirm(message: impl Into<Resolvable<String>>) -> PromptBuilder {
        PromptBuilder::new(
            PromptKind::Confirm {
                confirm_letter: 'y',
                reject_letter: 'n',
            },
            message,
        )
    }

    /// Free text
    pub fn input(message: impl Into<Resolvable<String>>) -> PromptBuilder {
        PromptBuilder::new(
            PromptKind::Input {
                completer: None,
                multiline: false,
            },
            message,
        )
    }

    /// Masked text
    pub fn secret(message: impl Into<Resolvable<String>>) -> PromptBuilder {
        PromptBuilder::new(PromptKind::Secret, message)
    }

    /// File system path with completion
    pub fn filepath(message: impl Into<Resolvable<String>>) -> PromptBuilder {
        PromptBuilder::new(
            PromptKind::FilePath {
                completer: Arc::new(FilePathCompleter::new()),
            },
            message,
        )
    }

    /// Pick one of `choices`
    pub fn select<I, C>(message: impl Into<Resolvable<String>>, choices: I) -> PromptBuilder
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        PromptBuilder::new(PromptKind::Select { choices }, message)
    }

    /// Pick any of `choices`
    pub fn checkbox<I, C>(message: impl Into<Resolvable<String>>, choices: I) -> PromptBuilder
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        PromptBuilder::new(PromptKind::Checkbox { choices }, message)
    }

    /// Outcome of the last run
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Prompt variant
    #[must_use]
    pub const fn kind(&self) -> &PromptKind {
        &self.kind
    }

    /// Key binding table
    #[must_use]
    pub const fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Where frames are painted
    #[must_use]
    pub const fn output_device(&self) -> &OutputDevice {
        &self.output
    }

    /// Question line for the current status
    ///
    /// Uses the message and default of the last run, or resolves them when
    /// the prompt has not run yet.
    #[must_use]
    pub fn prompt_message(&self) -> Vec<Fragment> {
        let (message, default) = self.resolved.clone().unwrap_or_else(|| {
            let answers = SessionResult::new();
            (
                self.message.resolve(&answers),
                self.default.as_ref().map(|d| d.resolve(&answers)),
            )
        });
        render(&self.status, &self.options, &self.kind, &message, default.as_ref())
    }

    /// Run the prompt, raising on interrupt as configured
    ///
    /// Returns `None` when the prompt was skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::KeyboardInterrupt`] on ctrl-c when raising,
    /// validator failures, device errors and [`PromptError::Eof`] when
    /// scripted input runs out.
    pub fn execute(&mut self) -> Result<Option<Answer>> {
        self.execute_with(self.options.raise_keyboard_interrupt)
    }

    /// Run the prompt with an explicit interrupt choice
    ///
    /// # Errors
    ///
    /// Same as [`Prompt::execute`].
    pub fn execute_with(&mut self, raise_keyboard_interrupt: bool) -> Result<Option<Answer>> {
        let (message, default) = self.start()?;
        let mut session = self.session(default.as_ref());
        let outcome = {
            let mut engine = Engine::new(
                &self.kind,
                &self.options,
                &self.status,
                &message,
                default.as_ref(),
                &mut self.handlers,
            );
            session.prompt(&mut engine)
        };
        self.conclude(session, outcome, raise_keyboard_interrupt)
    }

    /// Run the prompt inside an async runtime, raising on interrupt as
    /// configured
    ///
    /// # Errors
    ///
    /// Same as [`Prompt::execute`].
    pub async fn execute_async(&mut self) -> Result<Option<Answer>> {
        self.execute_async_with(self.options.raise_keyboard_interrupt)
            .await
    }

    /// Run the prompt inside an async runtime with an explicit interrupt
    /// choice
    ///
    /// # Errors
    ///
    /// Same as [`Prompt::execute`].
    pub async fn execute_async_with(
        &mut self,
        raise_keyboard_interrupt: bool,
    ) -> Result<Option<Answer>> {
        let (message, default) = self.start()?;
        let mut session = self.session(default.as_ref());
        let outcome = {
            let mut engine = Engine::new(
                &self.kind,
                &self.options,
                &self.status,
                &message,
                default.as_ref(),
                &mut self.handlers,
            );
            session.prompt_async(&mut engine).await
        };
        self.conclude(session, outcome, raise_keyboard_interrupt)
    }

    /// Reset the status and resolve message and default for a new run
    fn start(&mut self) -> Result<(String, Option<Answer>)> {
        let answers = SessionResult::new();
        let message = self.message.resolve(&answers);
        let default = self.default.as_ref().map(|d| d.resolve(&answers));
        if let Some(default) = &default {
            self.kind.check_default(default)?;
        }
        tracing::debug!(kind = self.kind.name(), %message, "prompt started");

        self.status = Status::default();
        self.resolved = Some((message.clone(), default.clone()));
        Ok((message, default))
    }

    fn session(&mut self, default: Option<&Answer>) -> Session {
        let options = SessionOptions {
            key_bindings: self.key_bindings.clone(),
            style: self.options.style.clone(),
            editing_mode: EditingMode::from_vi_mode(self.options.vi_mode),
            completer: self.kind.completer(),
            validator: self.options.validate.clone(),
            validate_while_typing: false,
            is_password: matches!(self.kind, PromptKind::Secret),
            multiline: self.kind.is_multiline(),
            complete_style: self.options.complete_style,
            wrap_lines: self.options.wrap_lines,
            bottom_toolbar: self.options.long_instruction.clone(),
        };
        let mut session = Session::new(
            options,
            std::mem::take(&mut self.input),
            std::mem::take(&mut self.output),
        );
        if self.kind.is_text() {
            if let Some(text) = default.and_then(Answer::as_text) {
                session.buffer_mut().set_text(text);
            }
        }
        session
    }

    /// Record the outcome, paint the final line and give the devices back
    fn conclude(
        &mut self,
        mut session: Session,
        outcome: Result<Exit>,
        raise_keyboard_interrupt: bool,
    ) -> Result<Option<Answer>> {
        let exit = match outcome {
            Ok(exit) => exit,
            Err(e) => {
                self.restore(session);
                return Err(e);
            }
        };
        tracing::debug!(?exit, kind = self.kind.name(), "prompt finished");

        let result = match exit {
            Exit::Answered(answer) => {
                self.status.commit(answer.clone());
                Ok(Some(self.options.apply_filter(answer)))
            }
            Exit::Skipped => {
                self.status.skip();
                Ok(None)
            }
            Exit::Interrupted if raise_keyboard_interrupt => Err(PromptError::KeyboardInterrupt),
            Exit::Interrupted => {
                self.status.skip();
                if matches!(self.kind, PromptKind::Confirm { .. }) {
                    Ok(Some(Answer::Bool(false)))
                } else {
                    Ok(None)
                }
            }
            Exit::Forced(answer) => Ok(answer.map(|a| self.options.apply_filter(a))),
        };

        let painted = session.finish(self.prompt_message());
        self.restore(session);
        painted?;
        result
    }

    fn restore(&mut self, session: Session) {
        let (input, output) = session.into_devices();
        self.input = input;
        self.output = output;
    }
}

/// Builder for [`Prompt`]
///
/// Setters never fail; problems are reported by [`PromptBuilder::build`].
pub struct PromptBuilder {
    kind: PromptKind,
    message: Resolvable<String>,
    default: Option<Resolvable<Answer>>,
    options: PromptOptions,
    validate: Option<Validate>,
    invalid_message: Option<String>,
    style: HashMap<String, String>,
    keybindings: KeybindOverrides,
    custom: Vec<(String, Handler)>,
    input: InputDevice,
    output: OutputDevice,
    error: Option<PromptError>,
}

impl fmt::Debug for PromptBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptBuilder")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("default", &self.default)
            .field("options", &self.options)
            .field("style", &self.style)
            .field("keybindings", &self.keybindings)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl PromptBuilder {
    fn new(kind: PromptKind, message: impl Into<Resolvable<String>>) -> Self {
        Self {
            kind,
            message: message.into(),
            default: None,
            options: PromptOptions::default(),
            validate: None,
            invalid_message: None,
            style: HashMap::new(),
            keybindings: KeybindOverrides::new(),
            custom: Vec::new(),
            input: InputDevice::default(),
            output: OutputDevice::default(),
            error: None,
        }
    }

    /// Keep the first setter error for `build`
    fn fail(&mut self, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(PromptError::invalid(message));
        }
    }

    /// Default answer
    #[must_use]
    pub fn default(mut self, default: impl Into<Resolvable<Answer>>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Default answer computed when the prompt runs
    #[must_use]
    pub fn default_with<F>(mut self, producer: F) -> Self
    where
        F: Fn(&SessionResult) -> Answer + Send + Sync + 'static,
    {
        self.default = Some(Resolvable::producer(producer));
        self
    }

    /// Message computed when the prompt runs
    #[must_use]
    pub fn message_with<F>(mut self, producer: F) -> Self
    where
        F: Fn(&SessionResult) -> String + Send + Sync + 'static,
    {
        self.message = Resolvable::producer(producer);
        self
    }

    /// Mark before the unanswered question
    #[must_use]
    pub fn qmark(mut self, qmark: impl Into<String>) -> Self {
        self.options.qmark = qmark.into();
        self
    }

    /// Mark before the answered question
    #[must_use]
    pub fn amark(mut self, amark: impl Into<String>) -> Self {
        self.options.amark = amark.into();
        self
    }

    /// Replace the variant's instruction
    #[must_use]
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.options.instruction = Some(instruction.into());
        self
    }

    /// Text shown below the prompt while it runs
    #[must_use]
    pub fn long_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.options.long_instruction = Some(instruction.into());
        self
    }

    /// Style overrides by class name
    #[must_use]
    pub fn style<I, K, V>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.style
            .extend(classes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Style override for one class
    #[must_use]
    pub fn style_class(mut self, class: impl Into<String>, style: impl Into<String>) -> Self {
        self.style.insert(class.into(), style.into());
        self
    }

    /// Vi editing and list navigation keys
    #[must_use]
    pub const fn vi_mode(mut self, vi_mode: bool) -> Self {
        self.options.vi_mode = vi_mode;
        self
    }

    /// Enter inserts newlines and `escape enter` submits
    #[must_use]
    pub fn multiline(mut self, multiline: bool) -> Self {
        match &mut self.kind {
            PromptKind::Input { multiline: m, .. } => *m = multiline,
            kind => {
                let name = kind.name();
                self.fail(format!("{name} prompt does not support multiline"));
            }
        }
        self
    }

    /// Validate answers before committing them
    #[must_use]
    pub fn validate(mut self, validate: impl Into<Validate>) -> Self {
        self.validate = Some(validate.into());
        self
    }

    /// Validate answers with a predicate
    #[must_use]
    pub fn validate_fn<F>(self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validate(Validate::predicate(predicate, DEFAULT_INVALID_MESSAGE))
    }

    /// Answers must match `pattern` entirely
    #[must_use]
    pub fn validate_regex(mut self, pattern: &str) -> Self {
        match Validate::regex(pattern, DEFAULT_INVALID_MESSAGE) {
            Ok(validate) => self.validate = Some(validate),
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e);
                }
            }
        }
        self
    }

    /// Message shown when a predicate or regex rejects the answer
    #[must_use]
    pub fn invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = Some(message.into());
        self
    }

    /// Map the answer before returning it
    #[must_use]
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(Answer) -> Answer + Send + Sync + 'static,
    {
        self.options.filter = Some(Box::new(filter));
        self
    }

    /// Map the answer for display after answering
    #[must_use]
    pub fn transformer<F>(mut self, transformer: F) -> Self
    where
        F: Fn(&Answer) -> String + Send + Sync + 'static,
    {
        self.options.transformer = Some(Box::new(transformer));
        self
    }

    /// Refuse to skip
    #[must_use]
    pub const fn mandatory(mut self, mandatory: bool) -> Self {
        self.options.mandatory = mandatory;
        self
    }

    /// Shown when a mandatory prompt is skipped
    #[must_use]
    pub fn mandatory_message(mut self, message: impl Into<String>) -> Self {
        self.options.mandatory_message = message.into();
        self
    }

    /// Raise on ctrl-c when executed without an explicit choice
    #[must_use]
    pub const fn raise_keyboard_interrupt(mut self, raise: bool) -> Self {
        self.options.raise_keyboard_interrupt = raise;
        self
    }

    /// Wrap long lines
    #[must_use]
    pub const fn wrap_lines(mut self, wrap: bool) -> Self {
        self.options.wrap_lines = wrap;
        self
    }

    /// Completion menu layout
    #[must_use]
    pub const fn complete_style(mut self, style: CompleteStyle) -> Self {
        self.options.complete_style = style;
        self
    }

    /// Key binding overrides by action name
    #[must_use]
    pub fn keybindings(mut self, overrides: KeybindOverrides) -> Self {
        self.keybindings.extend(&overrides);
        self
    }

    /// Bind `keys` to a handler
    ///
    /// The handler may edit the session or end the run with
    /// [`Session::exit`].
    #[must_use]
    pub fn bind<F>(mut self, keys: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&mut Session) -> Result<()> + Send + 'static,
    {
        self.custom.push((keys.into(), Box::new(handler)));
        self
    }

    /// Completion source for input prompts
    #[must_use]
    pub fn completer(mut self, completer: impl Completer + 'static) -> Self {
        match &mut self.kind {
            PromptKind::Input { completer: c, .. } => *c = Some(Arc::new(completer)),
            kind => {
                let name = kind.name();
                self.fail(format!("{name} prompt does not take a completer"));
            }
        }
        self
    }

    fn with_path_completer(
        mut self,
        setting: &str,
        update: impl FnOnce(FilePathCompleter) -> FilePathCompleter,
    ) -> Self {
        match &mut self.kind {
            PromptKind::FilePath { completer } => {
                *completer = Arc::new(update((**completer).clone()));
            }
            kind => {
                let name = kind.name();
                self.fail(format!("{name} prompt does not support {setting}"));
            }
        }
        self
    }

    /// Complete directories only
    #[must_use]
    pub fn only_directories(self, only: bool) -> Self {
        self.with_path_completer("only_directories", |c| c.only_directories(only))
    }

    /// Complete files only
    #[must_use]
    pub fn only_files(self, only: bool) -> Self {
        self.with_path_completer("only_files", |c| c.only_files(only))
    }

    /// Resolve relative paths against `dir` instead of the working directory
    #[must_use]
    pub fn base_dir(self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.with_path_completer("base_dir", |c| c.with_base_dir(dir))
    }

    fn confirm_letters(mut self, letter: &str, accept: bool) -> Self {
        let mut chars = letter.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            self.fail(format!("confirm letter '{letter}' should be a single character"));
            return self;
        };
        match &mut self.kind {
            PromptKind::Confirm {
                confirm_letter,
                reject_letter,
            } => {
                if accept {
                    *confirm_letter = c;
                } else {
                    *reject_letter = c;
                }
            }
            kind => {
                let name = kind.name();
                self.fail(format!("{name} prompt does not take confirm letters"));
            }
        }
        self
    }

    /// Letter answering yes
    #[must_use]
    pub fn confirm_letter(self, letter: &str) -> Self {
        self.confirm_letters(letter, true)
    }

    /// Letter answering no
    #[must_use]
    pub fn reject_letter(self, letter: &str) -> Self {
        self.confirm_letters(letter, false)
    }

    /// Apply user level defaults
    ///
    /// Call before other setters so they take precedence.
    #[must_use]
    pub fn settings(mut self, config: &AskrConfig) -> Self {
        self.options.qmark.clone_from(&config.qmark);
        self.options.amark.clone_from(&config.amark);
        self.options.vi_mode = config.vi_mode;
        self.options.raise_keyboard_interrupt = config.raise_keyboard_interrupt;
        self.style
            .extend(config.style.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.keybindings.extend(&config.keybindings);
        self
    }

    /// Key source
    #[must_use]
    pub fn input(mut self, input: impl Into<InputDevice>) -> Self {
        self.input = input.into();
        self
    }

    /// Frame destination
    #[must_use]
    pub fn output(mut self, output: impl Into<OutputDevice>) -> Self {
        self.output = output.into();
        self
    }

    /// Check every argument and build the prompt
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] for a default of the wrong
    /// type, bad confirm letters, empty or unknown choices, unparsable or
    /// duplicate key bindings and invalid style strings.
    pub fn build(self) -> Result<Prompt> {
        let Self {
            kind,
            message,
            default,
            mut options,
            validate,
            invalid_message,
            style,
            keybindings,
            custom,
            input,
            output,
            error,
        } = self;

        if let Some(e) = error {
            return Err(e);
        }
        kind.check()?;
        if let Some(default) = default.as_ref().and_then(Resolvable::literal) {
            kind.check_default(default)?;
        }

        options.style = Style::with_overrides(&style)?;
        options.validate = validate
            .map(|v| with_invalid_message(v, invalid_message))
            .map(Arc::new);

        let table = kind.default_bindings(options.vi_mode);
        let mut key_bindings = KeyBindings::from_table(&table, &keybindings)?;
        let mut handlers = Vec::with_capacity(custom.len());
        for (index, (keys, handler)) in custom.into_iter().enumerate() {
            key_bindings.bind(&keys, Binding::Custom(index))?;
            handlers.push(handler);
        }

        tracing::trace!(kind = kind.name(), bindings = key_bindings.len(), "prompt built");
        Ok(Prompt {
            message,
            default,
            kind,
            options,
            key_bindings,
            handlers,
            status: Status::default(),
            input,
            output,
            resolved: None,
        })
    }
}

/// Replace the rejection message of predicate and regex validation
fn with_invalid_message(validate: Validate, message: Option<String>) -> Validate {
    let Some(message) = message else {
        return validate;
    };
    match validate {
        Validate::Predicate(predicate, _) => Validate::Predicate(predicate, message),
        Validate::Regex(regex, _) => Validate::Regex(regex, message),
        custom @ Validate::Custom(_) => custom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinds::KeybindDef;
    use crate::session::PipeInput;
    use crate::testing::{dummy, pipe};

    fn run(builder: PromptBuilder, keys: &str) -> (Prompt, Result<Option<Answer>>) {
        let mut prompt = builder.input(pipe(keys)).output(dummy()).build().unwrap();
        let result = prompt.execute();
        (prompt, result)
    }

    #[test]
    fn test_build_rejects_bad_default() {
        let err = Prompt::confirm("ok?").default("yes").build().unwrap_err();
        assert!(matches!(err, PromptError::InvalidArgument(_)));

        let err = Prompt::select("pick", ["a", "b"]).default("c").build().unwrap_err();
        assert!(err.to_string().contains("not one of the choices"));
    }

    #[test]
    fn test_build_rejects_bad_letters() {
        assert!(Prompt::confirm("ok?").confirm_letter("yes").build().is_err());
        assert!(Prompt::confirm("ok?")
            .confirm_letter("n")
            .reject_letter("N")
            .build()
            .is_err());
        assert!(Prompt::input("name").confirm_letter("y").build().is_err());
    }

    #[test]
    fn test_build_rejects_bad_style_and_bindings() {
        assert!(Prompt::input("x").style_class("question", "sparkly").build().is_err());
        assert!(Prompt::input("x").bind("ctrl-c", |_| Ok(())).build().is_err());
        assert!(Prompt::input("x").bind("ctrl-nope", |_| Ok(())).build().is_err());
        let overrides = KeybindOverrides::new().with("teleport", KeybindDef::from("ctrl-t"));
        assert!(Prompt::input("x").keybindings(overrides).build().is_err());
    }

    #[test]
    fn test_build_rejects_empty_choices() {
        let choices: Vec<&str> = Vec::new();
        assert!(Prompt::checkbox("pick", choices).build().is_err());
    }

    #[test]
    fn test_producer_message_and_default() {
        let builder = Prompt::input("unused")
            .message_with(|answers| format!("{} so far", answers.len()))
            .default_with(|_| Answer::from("dyn"));
        let (prompt, result) = run(builder, "\n");
        assert_eq!(result.unwrap(), Some(Answer::from("dyn")));
        assert_eq!(
            crate::style::plain_text(&prompt.prompt_message()),
            "? 0 so far dyn"
        );
    }

    #[test]
    fn test_producer_default_checked_at_run() {
        let mut prompt = Prompt::confirm("ok?")
            .default_with(|_| Answer::from("nope"))
            .input(pipe("\n"))
            .output(dummy())
            .build()
            .unwrap();
        assert!(matches!(prompt.execute(), Err(PromptError::InvalidArgument(_))));
    }

    #[test]
    fn test_filter_keeps_raw_status() {
        let builder = Prompt::input("n").filter(|a| Answer::from(format!("{a}{a}")));
        let (prompt, result) = run(builder, "ab\n");
        assert_eq!(result.unwrap(), Some(Answer::from("abab")));
        assert_eq!(prompt.status().result, Some(Answer::from("ab")));
    }

    #[test]
    fn test_interrupt_without_raising() {
        let (prompt, result) = run(Prompt::input("n").raise_keyboard_interrupt(false), "\x03");
        assert_eq!(result.unwrap(), None);
        assert!(prompt.status().skipped);

        let (prompt, result) = run(Prompt::confirm("ok?").raise_keyboard_interrupt(false), "\x03");
        assert_eq!(result.unwrap(), Some(Answer::Bool(false)));
        assert!(prompt.status().skipped);
    }

    #[test]
    fn test_interrupt_raises_by_default() {
        let (_, result) = run(Prompt::secret("pw"), "\x03");
        assert!(matches!(result, Err(PromptError::KeyboardInterrupt)));
    }

    #[test]
    fn test_settings_then_override() {
        let config = AskrConfig {
            qmark: "!".to_string(),
            raise_keyboard_interrupt: false,
            ..AskrConfig::default()
        };
        let builder = Prompt::input("n").settings(&config).qmark(">");
        let (prompt, result) = run(builder, "\x03");
        assert_eq!(result.unwrap(), None);
        assert_eq!(prompt.prompt_message()[0].text, ">");
    }

    #[test]
    fn test_invalid_message_replaces_default() {
        let builder = Prompt::input("n")
            .validate_fn(|t| t.len() > 2)
            .invalid_message("Too short");
        let output = crate::session::CapturedOutput::new();
        let mut prompt = builder.input(pipe("a\n")).output(output.clone()).build().unwrap();
        assert!(matches!(prompt.execute(), Err(PromptError::Eof)));
        assert!(!prompt.status().answered);
        assert!(output.frames().iter().any(|frame| frame.ends_with("\nToo short")));
    }

    #[test]
    fn test_devices_survive_runs() {
        let mut input = PipeInput::new();
        input.send_text("y");
        let mut prompt = Prompt::confirm("again?")
            .input(input)
            .output(dummy())
            .build()
            .unwrap();
        assert_eq!(prompt.execute().unwrap(), Some(Answer::Bool(true)));
        assert!(matches!(prompt.execute(), Err(PromptError::Eof)));
        assert_eq!(prompt.status(), &Status::default());
    }
}
