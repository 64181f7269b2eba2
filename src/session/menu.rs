//! Completion menu state

use super::buffer::LineBuffer;
use crate::completions::{CompleteStyle, Completer, Completion, MAX_COMPLETIONS};
use crate::style::Fragment;

/// Candidates offered for the token before the cursor
///
/// Cycling past either end returns to the text the user typed.
#[derive(Debug, Clone)]
pub struct CompletionMenu {
    candidates: Vec<Completion>,
    selected: Option<usize>,
    original: LineBuffer,
}

impl CompletionMenu {
    /// Ask `completer` for candidates; `None` when there are none
    pub fn open(completer: &dyn Completer, buffer: &LineBuffer) -> Option<Self> {
        let candidates: Vec<Completion> = completer
            .get_completions(&buffer.document())
            .take(MAX_COMPLETIONS)
            .collect();
        tracing::trace!(count = candidates.len(), "completion menu opened");
        if candidates.is_empty() {
            return None;
        }
        Some(Self {
            candidates,
            selected: None,
            original: buffer.clone(),
        })
    }

    /// Candidates in menu order
    #[must_use]
    pub fn candidates(&self) -> &[Completion] {
        &self.candidates
    }

    /// Index of the highlighted candidate
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Highlight the next candidate and apply it to `buffer`
    pub fn next(&mut self, buffer: &mut LineBuffer) {
        self.selected = match self.selected {
            None => Some(0),
            Some(i) if i + 1 < self.candidates.len() => Some(i + 1),
            Some(_) => None,
        };
        self.apply(buffer);
    }

    /// Highlight the previous candidate and apply it to `buffer`
    pub fn previous(&mut self, buffer: &mut LineBuffer) {
        self.selected = match self.selected {
            None => self.candidates.len().checked_sub(1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
        self.apply(buffer);
    }

    fn apply(&self, buffer: &mut LineBuffer) {
        *buffer = self.original.clone();
        if let Some(candidate) = self.selected.and_then(|i| self.candidates.get(i)) {
            buffer.replace_before_cursor(candidate.replaced_len(), &candidate.text);
        }
    }

    /// Menu lines, each to be drawn below the input
    #[must_use]
    pub fn render(&self, style: CompleteStyle) -> Vec<Vec<Fragment>> {
        let entry = |i: usize, candidate: &Completion| {
            let class = if self.selected == Some(i) {
                "completion.current".to_string()
            } else {
                candidate.style.clone().unwrap_or_else(|| "completion".to_string())
            };
            Fragment::new(class, candidate.display_text())
        };

        match style {
            CompleteStyle::Column => self
                .candidates
                .iter()
                .enumerate()
                .map(|(i, candidate)| {
                    let mut line = vec![Fragment::new("completion", " "), entry(i, candidate)];
                    if let Some(meta) = candidate.meta {
                        line.push(Fragment::new("completion.meta", format!("  {}", meta.label())));
                    }
                    line
                })
                .collect(),
            CompleteStyle::MultiColumn | CompleteStyle::ReadlineLike => {
                let mut line = Vec::new();
                for (i, candidate) in self.candidates.iter().enumerate() {
                    if i > 0 {
                        line.push(Fragment::new("completion", "  "));
                    }
                    line.push(entry(i, candidate));
                }
                vec![line]
            }
        }
    }
}
