//! Values given either literally or as a producer
//!
//! Messages and defaults may depend on earlier answers. A producer receives
//! the answers collected so far; a single prompt run passes an empty map.

use super::status::Answer;
use std::collections::HashMap;
use std::fmt;

/// Answers collected so far, keyed by question name
pub type SessionResult = HashMap<String, Answer>;

/// Producer signature for [`Resolvable::Producer`]
pub type Producer<T> = Box<dyn Fn(&SessionResult) -> T + Send + Sync>;

/// A literal value or a function producing it
pub enum Resolvable<T> {
    /// Fixed value
    Literal(T),
    /// Computed when the prompt runs
    Producer(Producer<T>),
}

impl<T: Clone> Resolvable<T> {
    /// Wrap a producer
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn(&SessionResult) -> T + Send + Sync + 'static,
    {
        Self::Producer(Box::new(f))
    }

    /// The value for the given prior answers
    #[must_use]
    pub fn resolve(&self, answers: &SessionResult) -> T {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Producer(producer) => producer(answers),
        }
    }

    /// The literal, when known before running
    #[must_use]
    pub const fn literal(&self) -> Option<&T> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Producer(_) => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Producer(_) => f.write_str("Producer"),
        }
    }
}

impl From<&str> for Resolvable<String> {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Resolvable<String> {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

macro_rules! literal_answer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Resolvable<Answer> {
                fn from(value: $ty) -> Self {
                    Self::Literal(value.into())
                }
            }
        )*
    };
}

literal_answer!(Answer, bool, &str, String, Vec<String>, Vec<&str>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        let r: Resolvable<String> = "hello".into();
        assert_eq!(r.resolve(&SessionResult::new()), "hello");
        assert_eq!(r.literal().map(String::as_str), Some("hello"));
    }

    #[test]
    fn test_producer_sees_answers() {
        let r = Resolvable::producer(|answers: &SessionResult| {
            format!("{} answers", answers.len())
        });
        assert!(r.literal().is_none());
        assert_eq!(r.resolve(&SessionResult::new()), "0 answers");

        let mut answers = SessionResult::new();
        answers.insert("name".to_string(), Answer::from("x"));
        assert_eq!(r.resolve(&answers), "1 answers");
    }

    #[test]
    fn test_answer_conversion() {
        let r: Resolvable<Answer> = true.into();
        assert_eq!(r.resolve(&SessionResult::new()), Answer::Bool(true));
    }
}
