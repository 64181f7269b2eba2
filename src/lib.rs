//! Askr - Interactive command-line prompts
//!
//! This library runs single questions in the terminal: confirm, free text,
//! secret, file path, select and checkbox prompts. Each prompt is built once,
//! checked up front, and executed either blocking or inside an async runtime.
//!
//! Key bindings, styles and question marks can be configured per prompt or
//! loaded as user defaults through [`config::AskrConfig`].

pub mod cli;
pub mod completions;
pub mod config;
pub mod error;
pub mod keybinds;
pub mod prompts;
pub mod session;
pub mod style;
pub mod validation;

#[cfg(test)]
pub mod testing;

pub use error::{PromptError, Result};
pub use prompts::{Answer, Choice, Prompt, PromptBuilder, Status};
