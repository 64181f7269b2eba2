//! Answers and prompt status

use serde::Serialize;
use std::fmt;

/// A value a prompt can produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// Confirm prompts
    Bool(bool),
    /// Text-like prompts and single selection
    Text(String),
    /// Multiple selection
    List(Vec<String>),
}

impl Answer {
    /// The boolean, if this is one
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The text, if this is text
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The items, if this is a list
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Variant name used in error messages
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<bool> for Answer {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Answer {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Answer {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for Answer {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for Answer {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(ToString::to_string).collect())
    }
}

/// Outcome of the last run of a prompt
///
/// `result` holds the raw answer (before any filter) and is only set once
/// the prompt was answered. A rejected submission leaves everything
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// An answer was committed
    pub answered: bool,
    /// The prompt was skipped or interrupted without raising
    pub skipped: bool,
    /// Raw committed answer
    pub result: Option<Answer>,
}

impl Status {
    /// Record a committed answer
    pub(crate) fn commit(&mut self, answer: Answer) {
        self.answered = true;
        self.skipped = false;
        self.result = Some(answer);
    }

    /// Record a skip
    pub(crate) fn skip(&mut self) {
        self.answered = false;
        self.skipped = true;
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Answer::from(true).as_bool(), Some(true));
        assert_eq!(Answer::from("x").as_text(), Some("x"));
        assert_eq!(Answer::from(vec!["a", "b"]).as_list().map(<[String]>::len), Some(2));
        assert_eq!(Answer::from("x").as_bool(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Answer::from(vec!["a", "b"]).to_string(), "a, b");
        assert_eq!(Answer::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_serialize_untagged() {
        assert_eq!(serde_json::to_string(&Answer::from(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Answer::from("hi")).unwrap(), "\"hi\"");
        assert_eq!(
            serde_json::to_string(&Answer::from(vec!["a"])).unwrap(),
            "[\"a\"]"
        );
    }

    #[test]
    fn test_status_transitions() {
        let mut status = Status::default();
        assert!(!status.answered && !status.skipped && status.result.is_none());

        status.commit(Answer::from("v"));
        assert!(status.answered);
        assert_eq!(status.result, Some(Answer::from("v")));

        status.skip();
        assert!(status.skipped && !status.answered);
        assert_eq!(status.result, None);
    }
}
