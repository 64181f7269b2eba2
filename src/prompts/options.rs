//! Per-prompt settings shared by every variant

use super::status::Answer;
use crate::completions::CompleteStyle;
use crate::style::Style;
use crate::validation::Validate;
use std::fmt;
use std::sync::Arc;

/// Message shown when skipping a mandatory prompt
pub const DEFAULT_MANDATORY_MESSAGE: &str = "Mandatory prompt";

/// Maps the committed answer to the value returned to the caller
pub type Filter = Box<dyn Fn(Answer) -> Answer + Send + Sync>;

/// Maps the committed answer to the text shown after answering
pub type Transformer = Box<dyn Fn(&Answer) -> String + Send + Sync>;

/// Settings of one prompt, fixed once built
pub struct PromptOptions {
    /// Mark before the unanswered question
    pub qmark: String,
    /// Mark before the answered question
    pub amark: String,
    /// Replaces the variant's default instruction
    pub instruction: Option<String>,
    /// Shown below the prompt while it runs
    pub long_instruction: Option<String>,
    /// Resolved style classes
    pub style: Style,
    /// Vi editing and list navigation keys
    pub vi_mode: bool,
    /// Answer validation
    pub validate: Option<Arc<Validate>>,
    /// Applied to the returned value only
    pub filter: Option<Filter>,
    /// Applied to the answered display only
    pub transformer: Option<Transformer>,
    /// Refuse to skip
    pub mandatory: bool,
    /// Shown when a mandatory prompt is skipped
    pub mandatory_message: String,
    /// Raise on ctrl-c when executed without an explicit choice
    pub raise_keyboard_interrupt: bool,
    /// Wrap long lines
    pub wrap_lines: bool,
    /// Completion menu layout
    pub complete_style: CompleteStyle,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            qmark: "?".to_string(),
            amark: "?".to_string(),
            instruction: None,
            long_instruction: None,
            style: Style::default(),
            vi_mode: false,
            validate: None,
            filter: None,
            transformer: None,
            mandatory: true,
            mandatory_message: DEFAULT_MANDATORY_MESSAGE.to_string(),
            raise_keyboard_interrupt: true,
            wrap_lines: true,
            complete_style: CompleteStyle::Column,
        }
    }
}

impl PromptOptions {
    /// Run the filter, if any
    #[must_use]
    pub fn apply_filter(&self, answer: Answer) -> Answer {
        match &self.filter {
            Some(filter) => filter(answer),
            None => answer,
        }
    }
}

impl fmt::Debug for PromptOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptOptions")
            .field("qmark", &self.qmark)
            .field("amark", &self.amark)
            .field("instruction", &self.instruction)
            .field("long_instruction", &self.long_instruction)
            .field("vi_mode", &self.vi_mode)
            .field("validate", &self.validate)
            .field("filter", &self.filter.is_some())
            .field("transformer", &self.transformer.is_some())
            .field("mandatory", &self.mandatory)
            .field("raise_keyboard_interrupt", &self.raise_keyboard_interrupt)
            .field("wrap_lines", &self.wrap_lines)
            .finish_non_exhaustive()
    }
}
