//! Frame painting
//!
//! A [`Frame`] is everything the prompt shows at one moment, split at the
//! cursor. Terminal output redraws the frame in place: it moves back to the
//! first row of the previous frame, clears downwards, prints, then parks the
//! cursor where the user is typing.

use crate::style::{Fragment, Style, plain_text};
use crossterm::style::PrintStyledContent;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, queue};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// One rendered state of a prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Fragments before the cursor
    pub head: Vec<Fragment>,
    /// Fragments after the cursor
    pub tail: Vec<Fragment>,
}

impl Frame {
    /// Frame with the cursor after `fragments`
    #[must_use]
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self {
            head: fragments,
            tail: Vec::new(),
        }
    }

    /// Plain text of the whole frame
    #[must_use]
    pub fn plain(&self) -> String {
        let mut text = plain_text(&self.head);
        text.push_str(&plain_text(&self.tail));
        text
    }
}

/// Output that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyOutput;

/// Output that records the plain text of every painted frame
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    frames: Arc<Mutex<Vec<String>>>,
}

impl CapturedOutput {
    /// Create an empty capture
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame painted so far, final answer line included
    #[must_use]
    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// The most recently painted frame
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.frames.lock().ok().and_then(|f| f.last().cloned())
    }

    fn push(&self, frame: String) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(frame);
        }
    }
}

/// Where frames are painted
#[derive(Debug, Clone, Default)]
pub enum OutputDevice {
    /// Standard output
    #[default]
    Terminal,
    /// Standard error, leaving stdout free for the answer
    Stderr,
    /// Nowhere
    Dummy,
    /// In-memory record of frames
    Captured(CapturedOutput),
}

impl From<DummyOutput> for OutputDevice {
    fn from(_: DummyOutput) -> Self {
        Self::Dummy
    }
}

impl From<CapturedOutput> for OutputDevice {
    fn from(capture: CapturedOutput) -> Self {
        Self::Captured(capture)
    }
}

/// Paints frames onto an [`OutputDevice`]
#[derive(Debug)]
pub struct Painter {
    device: OutputDevice,
    style: Style,
    wrap_lines: bool,
    /// Row of the cursor relative to the top of the last frame
    cursor_row: usize,
}

impl Painter {
    /// Create a painter
    #[must_use]
    pub fn new(device: OutputDevice, style: Style, wrap_lines: bool) -> Self {
        Self {
            device,
            style,
            wrap_lines,
            cursor_row: 0,
        }
    }

    /// Style used for fragments
    #[must_use]
    pub const fn style(&self) -> &Style {
        &self.style
    }

    /// Give the device back
    #[must_use]
    pub fn into_device(self) -> OutputDevice {
        self.device
    }

    /// Redraw `frame` in place of the previous one
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing to the terminal fails.
    pub fn paint(&mut self, frame: &Frame) -> io::Result<()> {
        match &self.device {
            OutputDevice::Dummy => Ok(()),
            OutputDevice::Captured(capture) => {
                capture.push(frame.plain());
                Ok(())
            }
            OutputDevice::Terminal => {
                let mut out = io::stdout().lock();
                self.paint_terminal(&mut out, frame)?;
                out.flush()
            }
            OutputDevice::Stderr => {
                let mut out = io::stderr().lock();
                self.paint_terminal(&mut out, frame)?;
                out.flush()
            }
        }
    }

    /// Draw the final frame and move below it
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing to the terminal fails.
    pub fn finish(&mut self, fragments: Vec<Fragment>) -> io::Result<()> {
        let frame = Frame::new(fragments);
        self.paint(&frame)?;
        match self.device {
            OutputDevice::Terminal => end_line(&mut io::stdout().lock())?,
            OutputDevice::Stderr => end_line(&mut io::stderr().lock())?,
            OutputDevice::Dummy | OutputDevice::Captured(_) => {}
        }
        self.cursor_row = 0;
        Ok(())
    }

    fn paint_terminal(&mut self, out: &mut impl Write, frame: &Frame) -> io::Result<()> {
        let width = terminal::size().map_or(usize::MAX, |(w, _)| usize::from(w.max(1)));

        queue!(out, cursor::MoveToColumn(0))?;
        if self.cursor_row > 0 {
            queue!(out, cursor::MoveUp(to_u16(self.cursor_row)))?;
        }
        queue!(out, Clear(ClearType::FromCursorDown))?;

        let head = split_lines(&frame.head);
        let all: Vec<Fragment> = frame.head.iter().chain(&frame.tail).cloned().collect();
        let lines = split_lines(&all);

        let visual_rows = |line: &[(String, String)]| -> usize {
            if self.wrap_lines {
                line_width(line).max(1).div_ceil(width)
            } else {
                1
            }
        };

        let head_col = head.last().map_or(0, |line| line_width(line));
        let mut cursor_row = head[..head.len().saturating_sub(1)]
            .iter()
            .map(|line| visual_rows(line))
            .sum::<usize>();
        let cursor_col = if self.wrap_lines {
            cursor_row += head_col / width;
            head_col % width
        } else {
            head_col.min(width.saturating_sub(1))
        };
        let total_rows: usize = lines.iter().map(|line| visual_rows(line)).sum();

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.write_all(b"\r\n")?;
            }
            let mut remaining = if self.wrap_lines { usize::MAX } else { width };
            for (class, text) in line {
                if remaining == 0 {
                    break;
                }
                let shown: String = text.chars().take(remaining).collect();
                remaining = remaining.saturating_sub(shown.chars().count());
                queue!(out, PrintStyledContent(self.style.get(class).apply(shown)))?;
            }
        }

        let below = total_rows.saturating_sub(1).saturating_sub(cursor_row);
        if below > 0 {
            queue!(out, cursor::MoveUp(to_u16(below)))?;
        }
        queue!(out, cursor::MoveToColumn(to_u16(cursor_col)))?;
        self.cursor_row = cursor_row;
        Ok(())
    }
}

fn end_line(out: &mut impl Write) -> io::Result<()> {
    out.write_all(b"\r\n")?;
    out.flush()
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn line_width(line: &[(String, String)]) -> usize {
    line.iter().map(|(_, text)| text.chars().count()).sum()
}

/// Split fragments into lines of `(class, text)` runs
fn split_lines(fragments: &[Fragment]) -> Vec<Vec<(String, String)>> {
    let mut lines = vec![Vec::new()];
    for fragment in fragments {
        for (i, piece) in fragment.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
            }
            if piece.is_empty() {
                continue;
            }
            if let Some(line) = lines.last_mut() {
                line.push((fragment.class.clone(), piece.to_string()));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        let fragments = vec![
            Fragment::new("question", "a\nb"),
            Fragment::new("input", "c"),
            Fragment::new("input", "\n"),
        ];
        let lines = split_lines(&fragments);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![("question".to_string(), "a".to_string())]);
        assert_eq!(line_width(&lines[1]), 2);
        assert!(lines[2].is_empty());
    }

    #[test]
    fn test_captured_frames() {
        let capture = CapturedOutput::new();
        let mut painter = Painter::new(capture.clone().into(), Style::default(), true);
        let frame = Frame {
            head: vec![Fragment::new("question", "name? "), Fragment::new("input", "ab")],
            tail: vec![Fragment::new("input", "c")],
        };
        painter.paint(&frame).unwrap();
        painter.finish(vec![Fragment::new("answer", "abc")]).unwrap();
        assert_eq!(capture.frames(), vec!["name? abc".to_string(), "abc".to_string()]);
        assert_eq!(capture.last().as_deref(), Some("abc"));
    }

    #[test]
    fn test_dummy_discards() {
        let mut painter = Painter::new(DummyOutput.into(), Style::default(), true);
        assert!(painter.paint(&Frame::default()).is_ok());
    }
}
