//! Completion from a fixed word list

use super::traits::{Completer, Completion, Document};

/// Completes the word before the cursor against a list of candidates
#[derive(Debug, Clone, Default)]
pub struct WordCompleter {
    words: Vec<String>,
    ignore_case: bool,
}

impl WordCompleter {
    /// Create a completer over `words`
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            ignore_case: false,
        }
    }

    /// Match prefixes case-insensitively
    #[must_use]
    pub const fn ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }
}

impl Completer for WordCompleter {
    fn get_completions<'a>(
        &'a self,
        document: &Document<'_>,
    ) -> Box<dyn Iterator<Item = Completion> + 'a> {
        let word = document.word_before_cursor();
        #[allow(clippy::cast_possible_wrap)]
        let start_position = -(word.chars().count() as isize);
        let needle = if self.ignore_case {
            word.to_lowercase()
        } else {
            word.to_string()
        };

        Box::new(self.words.iter().filter_map(move |candidate| {
            let matched = if self.ignore_case {
                candidate.to_lowercase().starts_with(&needle)
            } else {
                candidate.starts_with(&needle)
            };
            matched.then(|| Completion::new(candidate.clone(), start_position))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(completer: &WordCompleter, text: &str) -> Vec<String> {
        let doc = Document::at_end(text);
        completer.get_completions(&doc).map(|c| c.text).collect()
    }

    #[test]
    fn test_prefix_match() {
        let completer = WordCompleter::new(["hello", "hey", "what"]);
        assert_eq!(complete(&completer, "he"), vec!["hello", "hey"]);
        assert_eq!(complete(&completer, ""), vec!["hello", "hey", "what"]);
    }

    #[test]
    fn test_completes_last_word_only() {
        let completer = WordCompleter::new(["hello", "what"]);
        let doc = Document::at_end("say wh");
        let completions: Vec<Completion> = completer.get_completions(&doc).collect();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].text, "what");
        assert_eq!(completions[0].start_position, -2);
    }

    #[test]
    fn test_ignore_case() {
        let completer = WordCompleter::new(["Hello"]);
        assert!(complete(&completer, "he").is_empty());
        let completer = completer.ignore_case(true);
        assert_eq!(complete(&completer, "he"), vec!["Hello"]);
    }
}
