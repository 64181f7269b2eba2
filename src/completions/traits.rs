//! Completion types shared by every completer
//!
//! A completer looks at the text before the cursor and lazily yields
//! [`Completion`]s that replace the token being typed.

/// Snapshot of the input buffer handed to completers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    text: &'a str,
    /// Cursor position in characters, not bytes
    cursor_position: usize,
}

impl<'a> Document<'a> {
    /// Create a document, clamping the cursor to the end of the text
    #[must_use]
    pub fn new(text: &'a str, cursor_position: usize) -> Self {
        let len = text.chars().count();
        Self {
            text,
            cursor_position: cursor_position.min(len),
        }
    }

    /// Document with the cursor placed after the last character
    #[must_use]
    pub fn at_end(text: &'a str) -> Self {
        Self::new(text, text.chars().count())
    }

    /// Full buffer text
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Cursor position in characters
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Text between the start of the buffer and the cursor
    #[must_use]
    pub fn text_before_cursor(&self) -> &'a str {
        let byte = self
            .text
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.text.len(), |(i, _)| i);
        &self.text[..byte]
    }

    /// The whitespace-delimited word ending at the cursor
    #[must_use]
    pub fn word_before_cursor(&self) -> &'a str {
        let before = self.text_before_cursor();
        before
            .rsplit_once(char::is_whitespace)
            .map_or(before, |(_, word)| word)
    }
}

/// Display grouping for a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMeta {
    /// Candidate names a directory
    Directory,
    /// Candidate names a regular file (or anything that is not a directory)
    File,
}

impl CompletionMeta {
    /// Label shown next to the candidate in the completion menu
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

/// A suggested replacement for the token before the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Text inserted into the buffer
    pub text: String,
    /// Text shown in the menu, defaults to `text`
    pub display: Option<String>,
    /// Zero or negative: how many characters before the cursor get replaced
    pub start_position: isize,
    /// Optional style class for the menu entry
    pub style: Option<String>,
    /// Optional grouping key
    pub meta: Option<CompletionMeta>,
}

impl Completion {
    /// Create a completion replacing `-start_position` characters
    #[must_use]
    pub fn new(text: impl Into<String>, start_position: isize) -> Self {
        Self {
            text: text.into(),
            display: None,
            start_position,
            style: None,
            meta: None,
        }
    }

    /// Set the menu display text
    #[must_use]
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Set the grouping key
    #[must_use]
    pub const fn with_meta(mut self, meta: CompletionMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Text shown in the completion menu
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.text)
    }

    /// Number of characters before the cursor this completion replaces
    #[must_use]
    pub const fn replaced_len(&self) -> usize {
        self.start_position.unsigned_abs()
    }
}

/// Trait for interactive completers
///
/// Implementations must be cheap to call on every keystroke, keep no state
/// between calls and never fail: an unreadable source yields nothing.
pub trait Completer: Send + Sync {
    /// Lazily produce completions for the given document
    fn get_completions<'a>(
        &'a self,
        document: &Document<'_>,
    ) -> Box<dyn Iterator<Item = Completion> + 'a>;
}
