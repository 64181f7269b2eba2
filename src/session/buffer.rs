//! Editable input line

use crate::completions::Document;

/// Text being edited with a cursor measured in characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    /// Buffer holding `text` with the cursor at the end
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the buffer holds no text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Snapshot for completers
    #[must_use]
    pub fn document(&self) -> Document<'_> {
        Document::new(&self.text, self.cursor)
    }

    /// Text before and after the cursor
    #[must_use]
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_index(self.cursor))
    }

    /// Replace the whole text and move the cursor to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.text.chars().nth(index)
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Insert a string at the cursor
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete `count` characters before the cursor, returning how many went
    pub fn delete_before(&mut self, count: usize) -> usize {
        let count = count.min(self.cursor);
        let start = self.byte_index(self.cursor - count);
        let end = self.byte_index(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= count;
        count
    }

    /// Delete the character under the cursor
    pub fn delete_at_cursor(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.replace_range(start..end, "");
        true
    }

    /// Move the cursor by `delta` characters, clamped to the text
    pub fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor.saturating_add_signed(delta);
        self.cursor = target.min(self.len());
    }

    /// Move the cursor to an absolute position, clamped to the text
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.len());
    }

    /// Start of the line holding the cursor
    #[must_use]
    pub fn line_start(&self) -> usize {
        let (before, _) = self.split_at_cursor();
        before
            .rfind('\n')
            .map_or(0, |i| before[..=i].chars().count())
    }

    /// End of the line holding the cursor
    #[must_use]
    pub fn line_end(&self) -> usize {
        let (_, after) = self.split_at_cursor();
        self.cursor + after.find('\n').map_or(after.chars().count(), |i| after[..i].chars().count())
    }

    /// Delete from the cursor to the end of the line
    pub fn kill_to_line_end(&mut self) {
        let end = self.line_end();
        let (start_b, end_b) = (self.byte_index(self.cursor), self.byte_index(end));
        self.text.replace_range(start_b..end_b, "");
    }

    /// Delete from the start of the line to the cursor
    pub fn kill_to_line_start(&mut self) {
        let count = self.cursor - self.line_start();
        self.delete_before(count);
    }

    /// Position of the previous word start
    #[must_use]
    pub fn word_start_before(&self) -> usize {
        let chars: Vec<char> = self.text.chars().take(self.cursor).collect();
        let mut i = chars.len();
        while i > 0 && chars[i - 1].is_whitespace() {
            i -= 1;
        }
        while i > 0 && !chars[i - 1].is_whitespace() {
            i -= 1;
        }
        i
    }

    /// Position after the next word end
    #[must_use]
    pub fn word_end_after(&self) -> usize {
        let len = self.len();
        let mut i = self.cursor;
        while i < len && self.char_at(i).is_some_and(char::is_whitespace) {
            i += 1;
        }
        while i < len && self.char_at(i).is_some_and(|c| !c.is_whitespace()) {
            i += 1;
        }
        i
    }

    /// Delete the word before the cursor
    pub fn delete_word_before(&mut self) {
        let count = self.cursor - self.word_start_before();
        self.delete_before(count);
    }

    /// Replace `count` characters before the cursor with `replacement`
    pub fn replace_before_cursor(&mut self, count: usize, replacement: &str) {
        self.delete_before(count);
        self.insert_str(replacement);
    }
}
