//! Answer validation
//!
//! Prompts accept a validation capability in one of three shapes and
//! normalise it through [`Validate`]:
//!
//! - a predicate `Fn(&str) -> bool` with a message shown on rejection
//! - a regular expression the whole answer must match
//! - an object implementing [`Validator`]
//!
//! A rejected answer is not an error: it yields [`Validation::Invalid`] and
//! the prompt keeps running. An `Err` from a [`Validator`] means the validator
//! itself broke and aborts the prompt.
//!
//! # Example
//!
//! ```
//! use askr::validation::{Validate, Validation};
//!
//! let validate = Validate::predicate(|text| text.len() >= 3, "Too short");
//! assert_eq!(validate.validate("ab").unwrap(), Validation::Invalid("Too short".into()));
//! assert_eq!(validate.validate("abc").unwrap(), Validation::Valid);
//! ```

mod validators;

pub use validators::{EmptyInputValidator, NumberValidator, PasswordValidator, PathValidator};

use crate::error::{PromptError, Result};
use regex::Regex;
use std::fmt;

/// Message shown when a validator rejects input without its own message
pub const DEFAULT_INVALID_MESSAGE: &str = "Invalid input";

/// Outcome of validating an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The answer is acceptable
    Valid,
    /// The answer is rejected with a message for the user
    Invalid(String),
}

impl Validation {
    /// Whether the answer was accepted
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Accept when `ok`, otherwise reject with `message`
    #[must_use]
    pub fn check(ok: bool, message: &str) -> Self {
        if ok {
            Self::Valid
        } else {
            Self::Invalid(message.to_string())
        }
    }
}

/// Trait for validator objects
pub trait Validator: Send + Sync {
    /// Validate the answer text
    ///
    /// # Errors
    ///
    /// Returns an error only when the validator cannot do its job; a rejected
    /// answer is `Ok(Validation::Invalid(..))`.
    fn validate(&self, text: &str) -> Result<Validation>;
}

/// Predicate signature accepted by [`Validate::predicate`]
pub type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// A validation capability in any of the accepted shapes
pub enum Validate {
    /// Predicate plus rejection message
    Predicate(Predicate, String),
    /// Regex the entire answer must match, plus rejection message
    Regex(Regex, String),
    /// Validator object
    Custom(Box<dyn Validator>),
}

impl Validate {
    /// Wrap a predicate
    pub fn predicate<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Box::new(predicate), message.into())
    }

    /// Compile a regex pattern
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] if the pattern does not compile.
    pub fn regex(pattern: &str, message: impl Into<String>) -> Result<Self> {
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored)
            .map_err(|e| PromptError::invalid(format!("invalid validation regex: {e}")))?;
        Ok(Self::Regex(regex, message.into()))
    }

    /// Wrap a validator object
    pub fn custom(validator: impl Validator + 'static) -> Self {
        Self::Custom(Box::new(validator))
    }

    /// Validate the answer text
    ///
    /// # Errors
    ///
    /// Propagates failures of a [`Validate::Custom`] validator unchanged.
    pub fn validate(&self, text: &str) -> Result<Validation> {
        match self {
            Self::Predicate(predicate, message) => Ok(Validation::check(predicate(text), message)),
            Self::Regex(regex, message) => Ok(Validation::check(regex.is_match(text), message)),
            Self::Custom(validator) => validator.validate(text),
        }
    }
}

impl fmt::Debug for Validate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_, message) => f.debug_tuple("Predicate").field(message).finish(),
            Self::Regex(regex, message) => f
                .debug_tuple("Regex")
                .field(&regex.as_str())
                .field(message)
                .finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl<V: Validator + 'static> From<V> for Validate {
    fn from(validator: V) -> Self {
        Self::custom(validator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Validator for Broken {
        fn validate(&self, _text: &str) -> Result<Validation> {
            Err(PromptError::Validator("backend unavailable".into()))
        }
    }

    #[test]
    fn test_predicate() {
        let v = Validate::predicate(|t| !t.is_empty(), DEFAULT_INVALID_MESSAGE);
        assert!(v.validate("x").unwrap().is_valid());
        assert_eq!(
            v.validate("").unwrap(),
            Validation::Invalid("Invalid input".into())
        );
    }

    #[test]
    fn test_regex_matches_whole_answer() {
        let v = Validate::regex(r"\d+", "Digits only").unwrap();
        assert!(v.validate("123").unwrap().is_valid());
        assert!(!v.validate("12a").unwrap().is_valid());
        assert!(!v.validate("a12").unwrap().is_valid());
    }

    #[test]
    fn test_bad_regex() {
        assert!(matches!(
            Validate::regex("(", "x"),
            Err(PromptError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_custom_error_propagates() {
        let v = Validate::custom(Broken);
        assert!(matches!(v.validate("x"), Err(PromptError::Validator(_))));
    }

    #[test]
    fn test_from_validator() {
        let v: Validate = EmptyInputValidator::default().into();
        assert!(matches!(v, Validate::Custom(_)));
        assert!(!v.validate("").unwrap().is_valid());
    }
}
