//! Error types shared by every prompt

use thiserror::Error;

/// Errors that can abort a prompt
///
/// Validation rejections are not errors: they are reported through
/// [`crate::validation::Validation::Invalid`] and keep the prompt running.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Malformed prompt configuration, raised when the prompt is built
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The user interrupted the prompt (ctrl-c)
    #[error("Prompt interrupted by user")]
    KeyboardInterrupt,

    /// A validator failed internally (not a rejected answer)
    #[error("Validator error: {0}")]
    Validator(String),

    /// The input device ran out of key events
    #[error("Input device reached end of input")]
    Eof,

    /// Terminal I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading failure
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl PromptError {
    /// Shorthand for an [`PromptError::InvalidArgument`]
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type for prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;
