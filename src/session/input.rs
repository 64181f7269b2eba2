//! Key sources for a prompt session

use crate::error::{PromptError, Result};
use crate::keybinds::Key;
use crossterm::event::{self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use futures_util::StreamExt;
use std::collections::VecDeque;

/// Where key presses come from
#[derive(Default)]
pub enum InputDevice {
    /// The controlling terminal, read in raw mode
    #[default]
    Terminal,
    /// Terminal read through an async event stream
    TerminalStream(EventStream),
    /// Scripted keys, used by tests and non-interactive callers
    Pipe(PipeInput),
}

impl std::fmt::Debug for InputDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terminal => f.write_str("Terminal"),
            Self::TerminalStream(_) => f.write_str("TerminalStream"),
            Self::Pipe(pipe) => f.debug_tuple("Pipe").field(pipe).finish(),
        }
    }
}

impl From<PipeInput> for InputDevice {
    fn from(pipe: PipeInput) -> Self {
        Self::Pipe(pipe)
    }
}

impl InputDevice {
    /// Whether keys come from the real terminal
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal | Self::TerminalStream(_))
    }

    /// Block until the next key press
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`] if reading the terminal fails and
    /// [`PromptError::Eof`] when scripted input is exhausted.
    pub fn next_key(&mut self) -> Result<Key> {
        match self {
            Self::Terminal | Self::TerminalStream(_) => loop {
                if let Some(key) = key_from_event(event::read()?) {
                    return Ok(key);
                }
            },
            Self::Pipe(pipe) => pipe.pop().ok_or(PromptError::Eof),
        }
    }

    /// Wait for the next key press without blocking the runtime
    ///
    /// # Errors
    ///
    /// Same as [`InputDevice::next_key`]; a closed event stream is
    /// [`PromptError::Eof`].
    pub async fn next_key_async(&mut self) -> Result<Key> {
        if matches!(self, Self::Terminal) {
            *self = Self::TerminalStream(EventStream::new());
        }
        match self {
            Self::TerminalStream(stream) => loop {
                match stream.next().await {
                    Some(event) => {
                        if let Some(key) = key_from_event(event?) {
                            return Ok(key);
                        }
                    }
                    None => return Err(PromptError::Eof),
                }
            },
            Self::Pipe(pipe) => {
                tokio::task::yield_now().await;
                pipe.pop().ok_or(PromptError::Eof)
            }
            Self::Terminal => Err(PromptError::Eof),
        }
    }
}

fn key_from_event(event: Event) -> Option<Key> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(Key::from(key)),
        _ => None,
    }
}

/// Scripted key input
///
/// Text is translated to keys the way a terminal would deliver it:
/// `"\n"` and `"\r"` are Enter, `"\x1b"` is Escape, `"\t"` is Tab, `"\x7f"`
/// is Backspace and other control characters are ctrl + letter
/// (`"\x03"` is ctrl-c, `"\x1a"` is ctrl-z).
#[derive(Debug, Clone, Default)]
pub struct PipeInput {
    keys: VecDeque<Key>,
}

impl PipeInput {
    /// Create an empty pipe
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the keys produced by typing `text`
    pub fn send_text(&mut self, text: &str) {
        self.keys.extend(text.chars().map(char_to_key));
    }

    /// Queue a single key
    pub fn send_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Number of queued keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys are queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn pop(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }
}

fn char_to_key(c: char) -> Key {
    match c {
        '\n' | '\r' => Key::plain(KeyCode::Enter),
        '\x1b' => Key::plain(KeyCode::Esc),
        '\t' => Key::plain(KeyCode::Tab),
        '\x7f' | '\x08' => Key::plain(KeyCode::Backspace),
        '\x00' => Key::new(KeyCode::Char(' '), KeyModifiers::CONTROL),
        c if (c as u32) < 0x20 => {
            let letter = char::from(b'a' + (c as u8) - 1);
            Key::ctrl(letter)
        }
        c => Key::plain(KeyCode::Char(c)),
    }
}

/// Keeps the terminal in raw mode while alive
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Enter raw mode
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`] if the terminal refuses raw mode.
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to leave raw mode");
        }
    }
}
