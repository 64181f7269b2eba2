//! Stock validators for common answer shapes

use super::{Validation, Validator};
use crate::error::Result;
use std::path::PathBuf;

/// Rejects empty answers
#[derive(Debug, Clone)]
pub struct EmptyInputValidator {
    message: String,
}

impl EmptyInputValidator {
    /// Create with a custom rejection message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmptyInputValidator {
    fn default() -> Self {
        Self::new("Input cannot be empty")
    }
}

impl Validator for EmptyInputValidator {
    fn validate(&self, text: &str) -> Result<Validation> {
        Ok(Validation::check(!text.is_empty(), &self.message))
    }
}

/// Requires the answer to name an existing path
#[derive(Debug, Clone)]
pub struct PathValidator {
    message: String,
    is_file: bool,
    is_dir: bool,
}

impl PathValidator {
    /// Create with a custom rejection message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_file: false,
            is_dir: false,
        }
    }

    /// Require a regular file
    #[must_use]
    pub const fn is_file(mut self, yes: bool) -> Self {
        self.is_file = yes;
        self
    }

    /// Require a directory
    #[must_use]
    pub const fn is_dir(mut self, yes: bool) -> Self {
        self.is_dir = yes;
        self
    }

    fn expand(text: &str) -> PathBuf {
        match (text.strip_prefix('~'), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest.trim_start_matches(['/', '\\'])),
            _ => PathBuf::from(text),
        }
    }
}

impl Default for PathValidator {
    fn default() -> Self {
        Self::new("Input is not a valid path")
    }
}

impl Validator for PathValidator {
    fn validate(&self, text: &str) -> Result<Validation> {
        let path = Self::expand(text);
        let ok = if self.is_file {
            path.is_file()
        } else if self.is_dir {
            path.is_dir()
        } else {
            path.exists()
        };
        Ok(Validation::check(ok, &self.message))
    }
}

/// Requires a number
#[derive(Debug, Clone)]
pub struct NumberValidator {
    message: String,
    float_allowed: bool,
}

impl NumberValidator {
    /// Create with a custom rejection message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            float_allowed: false,
        }
    }

    /// Also accept floating point numbers
    #[must_use]
    pub const fn float_allowed(mut self, allowed: bool) -> Self {
        self.float_allowed = allowed;
        self
    }
}

impl Default for NumberValidator {
    fn default() -> Self {
        Self::new("Input should be a number")
    }
}

impl Validator for NumberValidator {
    fn validate(&self, text: &str) -> Result<Validation> {
        let ok = if self.float_allowed {
            text.parse::<f64>().is_ok_and(f64::is_finite)
        } else {
            text.parse::<i64>().is_ok()
        };
        Ok(Validation::check(ok, &self.message))
    }
}

/// Characters counted as special by [`PasswordValidator`]
const SPECIAL_CHARS: &str = "@$!%*#?&";

/// Enforces password complexity rules
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    message: String,
    length: Option<usize>,
    cap: bool,
    special: bool,
    number: bool,
}

impl PasswordValidator {
    /// Create with a custom rejection message and no rules
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            length: None,
            cap: false,
            special: false,
            number: false,
        }
    }

    /// Minimum length in characters
    #[must_use]
    pub const fn length(mut self, min: usize) -> Self {
        self.length = Some(min);
        self
    }

    /// Require an uppercase letter
    #[must_use]
    pub const fn cap(mut self, yes: bool) -> Self {
        self.cap = yes;
        self
    }

    /// Require one of `@$!%*#?&`
    #[must_use]
    pub const fn special(mut self, yes: bool) -> Self {
        self.special = yes;
        self
    }

    /// Require a digit
    #[must_use]
    pub const fn number(mut self, yes: bool) -> Self {
        self.number = yes;
        self
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new("Input is not a secure password")
    }
}

impl Validator for PasswordValidator {
    fn validate(&self, text: &str) -> Result<Validation> {
        let ok = self.length.is_none_or(|min| text.chars().count() >= min)
            && (!self.cap || text.chars().any(char::is_uppercase))
            && (!self.special || text.chars().any(|c| SPECIAL_CHARS.contains(c)))
            && (!self.number || text.chars().any(|c| c.is_ascii_digit()));
        Ok(Validation::check(ok, &self.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TempTree;

    fn valid(v: &impl Validator, text: &str) -> bool {
        v.validate(text).unwrap().is_valid()
    }

    #[test]
    fn test_empty_input() {
        let v = EmptyInputValidator::default();
        assert!(!valid(&v, ""));
        assert!(valid(&v, " "));
    }

    #[test]
    fn test_path_validator() {
        let tree = TempTree::new(&["dir1"], &["file1"]);
        let file = tree.path().join("file1").display().to_string();
        let dir = tree.path().join("dir1").display().to_string();
        let missing = tree.path().join("nope").display().to_string();

        let any = PathValidator::default();
        assert!(valid(&any, &file));
        assert!(valid(&any, &dir));
        assert!(!valid(&any, &missing));

        let files = PathValidator::default().is_file(true);
        assert!(valid(&files, &file));
        assert!(!valid(&files, &dir));

        let dirs = PathValidator::default().is_dir(true);
        assert!(valid(&dirs, &dir));
        assert!(!valid(&dirs, &file));
    }

    #[test]
    fn test_path_validator_message() {
        let v = PathValidator::new("nope");
        assert_eq!(
            v.validate("/definitely/not/here").unwrap(),
            Validation::Invalid("nope".into())
        );
    }

    #[test]
    fn test_number_validator() {
        let ints = NumberValidator::default();
        assert!(valid(&ints, "42"));
        assert!(valid(&ints, "-7"));
        assert!(!valid(&ints, "4.2"));
        assert!(!valid(&ints, "abc"));

        let floats = NumberValidator::default().float_allowed(true);
        assert!(valid(&floats, "4.2"));
        assert!(!valid(&floats, "NaN"));
    }

    #[test]
    fn test_password_validator() {
        let v = PasswordValidator::default()
            .length(8)
            .cap(true)
            .special(true)
            .number(true);
        assert!(!valid(&v, "afas"));
        assert!(!valid(&v, "abcdefgh"));
        assert!(!valid(&v, "Abcdefg1"));
        assert!(valid(&v, "Abcdef1!"));

        assert!(valid(&PasswordValidator::default(), ""));
    }
}
