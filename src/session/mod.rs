//! Prompt session: the terminal side of a prompt
//!
//! A [`Session`] owns everything a running prompt needs from the terminal:
//! the key source, the frame painter, the input line with its editor, the
//! completion menu and the validation message. It knows nothing about prompt
//! kinds. The prompt engine plugs in through [`Driver`], which renders frames
//! and reacts to keys, and the session runs the loop:
//!
//! ```text
//! paint(driver.render()) -> await key -> driver.handle_key() -> ...
//! ```
//!
//! Waiting for the next key is the only suspension point of
//! [`Session::prompt_async`]; handlers always run to completion.

pub mod buffer;
pub mod editing;
pub mod input;
pub mod menu;
pub mod output;

pub use buffer::LineBuffer;
pub use editing::{Edit, EditingMode, Editor, ViState};
pub use input::{InputDevice, PipeInput, RawModeGuard};
pub use menu::CompletionMenu;
pub use output::{CapturedOutput, DummyOutput, Frame, OutputDevice, Painter};

use crate::completions::{CompleteStyle, Completer};
use crate::error::Result;
use crate::keybinds::{Dispatched, Key, KeyBindings};
use crate::prompts::Answer;
use crate::style::{Fragment, Style};
use crate::validation::{Validate, Validation};
use std::fmt;
use std::sync::Arc;

/// Everything a session is configured with
pub struct SessionOptions {
    /// Key sequence to binding table
    pub key_bindings: KeyBindings,
    /// Resolved style classes
    pub style: Style,
    /// Emacs or vi editing keys
    pub editing_mode: EditingMode,
    /// Completer consulted by the completion keys
    pub completer: Option<Arc<dyn Completer>>,
    /// Validator run on submit
    pub validator: Option<Arc<Validate>>,
    /// Also validate after every edit
    pub validate_while_typing: bool,
    /// Mask the input line
    pub is_password: bool,
    /// Enter inserts a newline
    pub multiline: bool,
    /// Completion menu layout
    pub complete_style: CompleteStyle,
    /// Wrap long lines instead of cutting them at the terminal width
    pub wrap_lines: bool,
    /// Text shown below the prompt
    pub bottom_toolbar: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::new(),
            style: Style::default(),
            editing_mode: EditingMode::Emacs,
            completer: None,
            validator: None,
            validate_while_typing: false,
            is_password: false,
            multiline: false,
            complete_style: CompleteStyle::Column,
            wrap_lines: true,
            bottom_toolbar: None,
        }
    }
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("key_bindings", &self.key_bindings.len())
            .field("editing_mode", &self.editing_mode)
            .field("completer", &self.completer.is_some())
            .field("validator", &self.validator)
            .field("is_password", &self.is_password)
            .field("multiline", &self.multiline)
            .field("complete_style", &self.complete_style)
            .field("wrap_lines", &self.wrap_lines)
            .field("bottom_toolbar", &self.bottom_toolbar)
            .finish_non_exhaustive()
    }
}

/// The prompt side of a session loop
pub trait Driver {
    /// Value the loop ends with
    type Output;

    /// Current frame
    fn render(&self, session: &Session) -> Frame;

    /// React to one key press; `Some` ends the loop
    ///
    /// # Errors
    ///
    /// Any error ends the loop and is returned from the session.
    fn handle_key(&mut self, session: &mut Session, key: Key) -> Result<Option<Self::Output>>;
}

/// A running prompt's terminal state
#[derive(Debug)]
pub struct Session {
    options: SessionOptions,
    input: InputDevice,
    painter: Painter,
    buffer: LineBuffer,
    editor: Editor,
    menu: Option<CompletionMenu>,
    error: Option<String>,
    pending: Vec<Key>,
    exit: Option<Option<Answer>>,
}

impl Session {
    /// Create a session over the given devices
    #[must_use]
    pub fn new(options: SessionOptions, input: InputDevice, output: OutputDevice) -> Self {
        let painter = Painter::new(output, options.style.clone(), options.wrap_lines);
        let editor = Editor::new(options.editing_mode, options.multiline);
        Self {
            options,
            input,
            painter,
            buffer: LineBuffer::default(),
            editor,
            menu: None,
            error: None,
            pending: Vec::new(),
            exit: None,
        }
    }

    /// Give the devices back once the loop is over
    #[must_use]
    pub fn into_devices(self) -> (InputDevice, OutputDevice) {
        (self.input, self.painter.into_device())
    }

    /// Session options
    #[must_use]
    pub const fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Input line
    #[must_use]
    pub const fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Mutable input line
    pub fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    /// Line editor state
    #[must_use]
    pub const fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Open completion menu, if any
    #[must_use]
    pub const fn menu(&self) -> Option<&CompletionMenu> {
        self.menu.as_ref()
    }

    /// Validation message on display, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show a message below the prompt until the next edit
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Hide the message below the prompt
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// End the loop with `result`, bypassing validation and state updates
    pub fn exit(&mut self, result: Option<Answer>) {
        self.exit = Some(result);
    }

    /// Take a pending forced exit
    pub fn take_exit(&mut self) -> Option<Option<Answer>> {
        self.exit.take()
    }

    /// Feed a key through the binding table
    pub fn dispatch(&mut self, key: Key) -> Vec<Dispatched> {
        self.options.key_bindings.dispatch(&mut self.pending, key)
    }

    /// Apply an unbound key to the input line
    ///
    /// # Errors
    ///
    /// Propagates validator failures when validating while typing.
    pub fn edit(&mut self, key: Key) -> Result<Edit> {
        let edit = self.editor.apply(&mut self.buffer, key);
        if edit == Edit::Changed {
            self.menu = None;
            self.error = None;
            if self.options.validate_while_typing {
                if let Validation::Invalid(message) = self.validate()? {
                    self.error = Some(message);
                }
            }
        }
        Ok(edit)
    }

    /// Open the completion menu or highlight its next candidate
    pub fn complete_next(&mut self) {
        self.cycle_completion(true);
    }

    /// Open the completion menu or highlight its previous candidate
    pub fn complete_previous(&mut self) {
        self.cycle_completion(false);
    }

    fn cycle_completion(&mut self, forward: bool) {
        let Some(completer) = self.options.completer.as_deref() else {
            return;
        };
        if self.menu.is_none() {
            self.menu = CompletionMenu::open(completer, &self.buffer);
        }
        if let Some(menu) = self.menu.as_mut() {
            if forward {
                menu.next(&mut self.buffer);
            } else {
                menu.previous(&mut self.buffer);
            }
        }
    }

    /// Close the completion menu, keeping the applied candidate
    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// Validate the input line
    ///
    /// # Errors
    ///
    /// Propagates validator failures.
    pub fn validate(&self) -> Result<Validation> {
        self.validate_text(self.buffer.text())
    }

    /// Validate arbitrary text with the session's validator
    ///
    /// # Errors
    ///
    /// Propagates validator failures.
    pub fn validate_text(&self, text: &str) -> Result<Validation> {
        match &self.options.validator {
            Some(validator) => validator.validate(text),
            None => Ok(Validation::Valid),
        }
    }

    /// Input line fragments before and after the cursor
    #[must_use]
    pub fn input_fragments(&self) -> (Fragment, Fragment) {
        let (before, after) = self.buffer.split_at_cursor();
        let show = |text: &str| {
            if self.options.is_password {
                "*".repeat(text.chars().filter(|c| *c != '\n').count())
            } else {
                text.to_string()
            }
        };
        (
            Fragment::new("input", show(before)),
            Fragment::new("input", show(after)),
        )
    }

    /// Completion menu, validation message and toolbar, each on its own line
    #[must_use]
    pub fn decorations(&self) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        if let Some(menu) = &self.menu {
            for line in menu.render(self.options.complete_style) {
                fragments.push(Fragment::new("", "\n"));
                fragments.extend(line);
            }
        }
        if let Some(error) = &self.error {
            fragments.push(Fragment::new("", "\n"));
            fragments.push(Fragment::new("validator", error.clone()));
        }
        if let Some(toolbar) = &self.options.bottom_toolbar {
            fragments.push(Fragment::new("", "\n"));
            fragments.push(Fragment::new("long_instruction", toolbar.clone()));
        }
        fragments
    }

    /// Replace the current frame with the final answer line
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output device fails.
    pub fn finish(&mut self, fragments: Vec<Fragment>) -> Result<()> {
        self.painter.finish(fragments)?;
        Ok(())
    }

    /// Run the blocking loop until the driver ends it
    ///
    /// # Errors
    ///
    /// Returns device errors, [`crate::PromptError::Eof`] when scripted
    /// input runs out, and any error raised by the driver.
    pub fn prompt<D: Driver>(&mut self, driver: &mut D) -> Result<D::Output> {
        let _raw = self.raw_mode()?;
        loop {
            let frame = driver.render(self);
            self.painter.paint(&frame)?;
            let key = self.input.next_key()?;
            if let Some(output) = driver.handle_key(self, key)? {
                return Ok(output);
            }
        }
    }

    /// Run the loop, awaiting keys cooperatively
    ///
    /// # Errors
    ///
    /// Same as [`Session::prompt`].
    pub async fn prompt_async<D: Driver>(&mut self, driver: &mut D) -> Result<D::Output> {
        let _raw = self.raw_mode()?;
        loop {
            let frame = driver.render(self);
            self.painter.paint(&frame)?;
            let key = self.input.next_key_async().await?;
            if let Some(output) = driver.handle_key(self, key)? {
                return Ok(output);
            }
        }
    }

    fn raw_mode(&self) -> Result<Option<RawModeGuard>> {
        if self.input.is_terminal() {
            RawModeGuard::enable().map(Some)
        } else {
            Ok(None)
        }
    }
}
