//! Interactive completion support
//!
//! Provides completers consulted by text-like prompts when the user presses
//! the completion key:
//! - File system paths ([`FilePathCompleter`])
//! - Fixed word lists ([`WordCompleter`])
//!
//! # Architecture
//!
//! Every completer implements [`Completer`], which receives a [`Document`]
//! (buffer text plus cursor) and returns a lazy iterator of [`Completion`]s.
//! Completers keep no state between calls; the session decides how many
//! candidates to pull.

mod path;
mod traits;
mod words;

pub use path::{FilePathCompleter, split_path};
pub use traits::*;
pub use words::WordCompleter;

/// Maximum number of candidates the session materialises per completion
pub const MAX_COMPLETIONS: usize = 50;

/// Style a completion menu is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompleteStyle {
    /// One candidate per line below the input
    #[default]
    Column,
    /// Candidates laid out side by side on one line
    MultiColumn,
    /// Candidates listed once above the input, readline style
    ReadlineLike,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_style_default() {
        assert_eq!(CompleteStyle::default(), CompleteStyle::Column);
    }
}
