//! Editing keys for the input line
//!
//! Keys that no binding claims fall through to the editor. Emacs mode is
//! modeless; vi mode starts in insert mode and supports a small normal mode
//! (`h l 0 $ w b x X D C i a I A`).

use super::buffer::LineBuffer;
use crate::keybinds::Key;
use crossterm::event::{KeyCode, KeyModifiers};

/// Key map used for line editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditingMode {
    /// Emacs style keys (ctrl-a, ctrl-e, ctrl-k, ...)
    #[default]
    Emacs,
    /// Minimal vi insert and normal modes
    Vi,
}

impl EditingMode {
    /// Vi when `vi_mode` is set, emacs otherwise
    #[must_use]
    pub const fn from_vi_mode(vi_mode: bool) -> Self {
        if vi_mode { Self::Vi } else { Self::Emacs }
    }
}

/// Current vi sub-mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViState {
    /// Typing inserts text
    #[default]
    Insert,
    /// Typing moves and edits
    Normal,
}

/// What a key did to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Text changed
    Changed,
    /// Only the cursor or mode changed
    Moved,
    /// Key had no meaning here
    Ignored,
}

/// Applies editing keys to a [`LineBuffer`]
#[derive(Debug, Clone, Default)]
pub struct Editor {
    mode: EditingMode,
    vi: ViState,
    multiline: bool,
}

impl Editor {
    /// Create an editor; `multiline` lets Enter insert newlines
    #[must_use]
    pub fn new(mode: EditingMode, multiline: bool) -> Self {
        Self {
            mode,
            vi: ViState::Insert,
            multiline,
        }
    }

    /// Active editing mode
    #[must_use]
    pub const fn mode(&self) -> EditingMode {
        self.mode
    }

    /// Active vi sub-mode (always insert in emacs mode)
    #[must_use]
    pub const fn vi_state(&self) -> ViState {
        self.vi
    }

    /// Apply one key to the buffer
    pub fn apply(&mut self, buffer: &mut LineBuffer, key: Key) -> Edit {
        match (self.mode, self.vi) {
            (EditingMode::Vi, ViState::Normal) => self.vi_normal(buffer, key),
            (EditingMode::Vi, ViState::Insert) if key.code == KeyCode::Esc => {
                self.vi = ViState::Normal;
                if buffer.cursor() > buffer.line_start() {
                    buffer.move_cursor(-1);
                }
                Edit::Moved
            }
            _ => self.insert_mode(buffer, key),
        }
    }

    fn insert_mode(&self, buffer: &mut LineBuffer, key: Key) -> Edit {
        if let Some(c) = key.printable() {
            buffer.insert_char(c);
            return Edit::Changed;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let emacs = self.mode == EditingMode::Emacs;

        match key.code {
            KeyCode::Enter if self.multiline => {
                buffer.insert_char('\n');
                Edit::Changed
            }
            KeyCode::Backspace if alt => changed_if(buffer, LineBuffer::delete_word_before),
            KeyCode::Backspace => edit_if(buffer.delete_before(1) > 0),
            KeyCode::Char('h') if ctrl => edit_if(buffer.delete_before(1) > 0),
            KeyCode::Delete => edit_if(buffer.delete_at_cursor()),
            KeyCode::Char('d') if ctrl && emacs => edit_if(buffer.delete_at_cursor()),
            KeyCode::Char('w') if ctrl => changed_if(buffer, LineBuffer::delete_word_before),
            KeyCode::Char('u') if ctrl => changed_if(buffer, LineBuffer::kill_to_line_start),
            KeyCode::Char('k') if ctrl && emacs => changed_if(buffer, LineBuffer::kill_to_line_end),
            KeyCode::Left => move_by(buffer, -1),
            KeyCode::Right => move_by(buffer, 1),
            KeyCode::Char('b') if ctrl && emacs => move_by(buffer, -1),
            KeyCode::Char('f') if ctrl && emacs => move_by(buffer, 1),
            KeyCode::Char('b') if alt && emacs => move_with(buffer, LineBuffer::word_start_before),
            KeyCode::Char('f') if alt && emacs => move_with(buffer, LineBuffer::word_end_after),
            KeyCode::Home => move_with(buffer, LineBuffer::line_start),
            KeyCode::End => move_with(buffer, LineBuffer::line_end),
            KeyCode::Char('a') if ctrl && emacs => move_with(buffer, LineBuffer::line_start),
            KeyCode::Char('e') if ctrl && emacs => move_with(buffer, LineBuffer::line_end),
            _ => Edit::Ignored,
        }
    }

    fn vi_normal(&mut self, buffer: &mut LineBuffer, key: Key) -> Edit {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Edit::Ignored;
        }
        match key.code {
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => move_by(buffer, -1),
            KeyCode::Char('l') | KeyCode::Right => move_by(buffer, 1),
            KeyCode::Char('0') | KeyCode::Home => move_with(buffer, LineBuffer::line_start),
            KeyCode::Char('$') | KeyCode::End => move_with(buffer, LineBuffer::line_end),
            KeyCode::Char('w') => move_with(buffer, LineBuffer::word_end_after),
            KeyCode::Char('b') => move_with(buffer, LineBuffer::word_start_before),
            KeyCode::Char('x') | KeyCode::Delete => edit_if(buffer.delete_at_cursor()),
            KeyCode::Char('X') => edit_if(buffer.delete_before(1) > 0),
            KeyCode::Char('D') => changed_if(buffer, LineBuffer::kill_to_line_end),
            KeyCode::Char('C') => {
                buffer.kill_to_line_end();
                self.vi = ViState::Insert;
                Edit::Changed
            }
            KeyCode::Char('i') => self.enter_insert(buffer, None),
            KeyCode::Char('a') => self.enter_insert(buffer, Some(|b: &LineBuffer| b.cursor() + 1)),
            KeyCode::Char('I') => self.enter_insert(buffer, Some(LineBuffer::line_start)),
            KeyCode::Char('A') => self.enter_insert(buffer, Some(LineBuffer::line_end)),
            _ => Edit::Ignored,
        }
    }

    fn enter_insert(&mut self, buffer: &mut LineBuffer, target: Option<Target>) -> Edit {
        if let Some(target) = target {
            move_with(buffer, target);
        }
        self.vi = ViState::Insert;
        Edit::Moved
    }
}

const fn edit_if(changed: bool) -> Edit {
    if changed { Edit::Changed } else { Edit::Ignored }
}

fn changed_if(buffer: &mut LineBuffer, op: fn(&mut LineBuffer)) -> Edit {
    let before = buffer.len();
    op(buffer);
    edit_if(buffer.len() != before)
}

fn move_by(buffer: &mut LineBuffer, delta: isize) -> Edit {
    buffer.move_cursor(delta);
    Edit::Moved
}

/// Cursor target computed from the buffer
type Target = fn(&LineBuffer) -> usize;

fn move_with(buffer: &mut LineBuffer, target: Target) -> Edit {
    let position = target(buffer);
    buffer.set_cursor(position);
    Edit::Moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(c: char) -> Key {
        Key::plain(KeyCode::Char(c))
    }

    fn type_keys(editor: &mut Editor, buffer: &mut LineBuffer, keys: &[Key]) {
        for key in keys {
            editor.apply(buffer, *key);
        }
    }

    #[test]
    fn test_emacs_editing() {
        let mut editor = Editor::new(EditingMode::Emacs, false);
        let mut buf = LineBuffer::new("hello world");
        type_keys(
            &mut editor,
            &mut buf,
            &[Key::ctrl('a'), Key::ctrl('f'), Key::ctrl('k')],
        );
        assert_eq!(buf.text(), "h");
        assert_eq!(editor.apply(&mut buf, ch('i')), Edit::Changed);
        assert_eq!(buf.text(), "hi");
        assert_eq!(editor.apply(&mut buf, Key::ctrl('w')), Edit::Changed);
        assert!(buf.is_empty());
        assert_eq!(editor.apply(&mut buf, Key::plain(KeyCode::Backspace)), Edit::Ignored);
    }

    #[test]
    fn test_enter_only_edits_in_multiline() {
        let mut single = Editor::new(EditingMode::Emacs, false);
        let mut buf = LineBuffer::default();
        assert_eq!(single.apply(&mut buf, Key::plain(KeyCode::Enter)), Edit::Ignored);

        let mut multi = Editor::new(EditingMode::Emacs, true);
        assert_eq!(multi.apply(&mut buf, Key::plain(KeyCode::Enter)), Edit::Changed);
        assert_eq!(buf.text(), "\n");
    }

    #[test]
    fn test_vi_normal_mode() {
        let mut editor = Editor::new(EditingMode::Vi, false);
        let mut buf = LineBuffer::default();
        type_keys(&mut editor, &mut buf, &[ch('a'), ch('b'), ch('c')]);
        assert_eq!(buf.text(), "abc");

        editor.apply(&mut buf, Key::plain(KeyCode::Esc));
        assert_eq!(editor.vi_state(), ViState::Normal);
        assert_eq!(buf.cursor(), 2);

        type_keys(&mut editor, &mut buf, &[ch('0'), ch('x')]);
        assert_eq!(buf.text(), "bc");

        type_keys(&mut editor, &mut buf, &[ch('A'), ch('d')]);
        assert_eq!(editor.vi_state(), ViState::Insert);
        assert_eq!(buf.text(), "bcd");
    }

    #[test]
    fn test_vi_normal_ignores_unknown() {
        let mut editor = Editor::new(EditingMode::Vi, false);
        let mut buf = LineBuffer::new("text");
        editor.apply(&mut buf, Key::plain(KeyCode::Esc));
        assert_eq!(editor.apply(&mut buf, ch('z')), Edit::Ignored);
        assert_eq!(buf.text(), "text");
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(EditingMode::from_vi_mode(true), EditingMode::Vi);
        assert_eq!(EditingMode::from_vi_mode(false), EditingMode::Emacs);
    }
}
