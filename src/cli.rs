//! Command-line interface definitions and parsing
//!
//! The `askr` binary asks one question and prints the answer, which makes
//! prompts usable from shell scripts:
//!
//! ```bash
//! askr confirm "Continue?" --default
//! askr input "Name" --default guest
//! askr --json checkbox "Toppings" cheese ham olives
//! ```
//!
//! Global flags:
//!
//! - `--json` prints the answer as JSON instead of plain text
//! - `--async` runs the prompt on a tokio runtime
//! - `--vi` enables vi key bindings
//! - `--no-raise` returns no answer on ctrl-c instead of failing
//!
//! The prompt itself is painted on stderr so that stdout carries only the
//! answer and `$(askr ...)` captures nothing else.

use crate::config::AskrConfig;
use crate::prompts::{Answer, Prompt, PromptBuilder};
use crate::session::OutputDevice;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "askr")]
#[command(about = "Ask a question in the terminal and print the answer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the answer as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Run the prompt on an async runtime
    #[arg(long = "async", global = true)]
    pub run_async: bool,

    /// Use vi key bindings (overrides config)
    #[arg(long = "vi", global = true)]
    pub vi: bool,

    /// Do not fail on ctrl-c; print nothing instead (overrides config)
    #[arg(long = "no-raise", global = true)]
    pub no_raise: bool,

    /// Text shown below the prompt
    #[arg(long = "help-text", global = true, value_name = "TEXT")]
    pub long_instruction: Option<String>,
}

/// Available prompts
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Ask a yes/no question
    #[command(visible_alias = "c")]
    Confirm {
        /// Question to ask
        message: String,

        /// Answer yes on Enter
        #[arg(short = 'd', long = "default")]
        default: bool,

        /// Letter answering yes
        #[arg(long = "yes-letter", value_name = "LETTER")]
        confirm_letter: Option<String>,

        /// Letter answering no
        #[arg(long = "no-letter", value_name = "LETTER")]
        reject_letter: Option<String>,
    },

    /// Ask for a line of text
    #[command(visible_alias = "i")]
    Input {
        /// Question to ask
        message: String,

        /// Pre-filled answer
        #[arg(short = 'd', long = "default", value_name = "TEXT")]
        default: Option<String>,

        /// Accept several lines, finished with escape + enter
        #[arg(short = 'm', long = "multiline")]
        multiline: bool,

        /// Words offered on tab
        #[arg(short = 'w', long = "word", value_name = "WORD", num_args = 0..)]
        words: Vec<String>,

        /// Regex the answer must match entirely
        #[arg(short = 'r', long = "regex", value_name = "PATTERN")]
        regex: Option<String>,
    },

    /// Ask for a secret without echoing it
    #[command(visible_alias = "s")]
    Secret {
        /// Question to ask
        message: String,

        /// Refuse empty answers
        #[arg(long = "required")]
        required: bool,
    },

    /// Ask for a file system path with completion
    #[command(visible_alias = "p")]
    Path {
        /// Question to ask
        message: String,

        /// Pre-filled answer
        #[arg(short = 'd', long = "default", value_name = "PATH")]
        default: Option<String>,

        /// Complete directories only
        #[arg(long = "dirs", conflicts_with = "files")]
        dirs: bool,

        /// Complete files only
        #[arg(long = "files", conflicts_with = "dirs")]
        files: bool,

        /// The answer must be an existing path
        #[arg(long = "exists")]
        exists: bool,

        /// Complete relative paths from this directory
        #[arg(long = "base", value_name = "DIR")]
        base: Option<PathBuf>,
    },

    /// Pick one of several choices
    Select {
        /// Question to ask
        message: String,

        /// Available choices
        #[arg(required = true, num_args = 1..)]
        choices: Vec<String>,

        /// Initially highlighted choice
        #[arg(short = 'd', long = "default", value_name = "CHOICE")]
        default: Option<String>,
    },

    /// Pick any number of choices
    Checkbox {
        /// Question to ask
        message: String,

        /// Available choices
        #[arg(required = true, num_args = 1..)]
        choices: Vec<String>,

        /// Initially checked choices
        #[arg(short = 'd', long = "default", value_name = "CHOICE", num_args = 0..)]
        defaults: Vec<String>,

        /// Refuse to skip with ctrl-z and require at least one choice
        #[arg(long = "required")]
        required: bool,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Prompt builder for the chosen command, with user defaults applied
    #[must_use]
    pub fn prompt_builder(&self, config: &AskrConfig) -> PromptBuilder {
        let mut builder = self
            .command
            .prompt_builder()
            .settings(config)
            .output(OutputDevice::Stderr);
        if self.vi {
            builder = builder.vi_mode(true);
        }
        if self.no_raise {
            builder = builder.raise_keyboard_interrupt(false);
        }
        if let Some(text) = &self.long_instruction {
            builder = builder.long_instruction(text.clone());
        }
        builder
    }
}

/// Write the answer as plain text or JSON
///
/// Lists are written one item per line and a skipped prompt writes nothing
/// (`null` with `json`).
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_answer(out: &mut impl Write, answer: Option<&Answer>, json: bool) -> io::Result<()> {
    if json {
        let text = serde_json::to_string(&answer).map_err(io::Error::from)?;
        return writeln!(out, "{text}");
    }

    match answer {
        None => Ok(()),
        Some(Answer::List(items)) => items.iter().try_for_each(|item| writeln!(out, "{item}")),
        Some(answer) => writeln!(out, "{answer}"),
    }
}

impl Commands {
    /// Prompt builder for this command
    ///
    /// Skipping is allowed unless the command asks for a required answer.
    #[must_use]
    pub fn prompt_builder(&self) -> PromptBuilder {
        match self {
            Self::Confirm {
                message,
                default,
                confirm_letter,
                reject_letter,
            } => {
                let mut builder = Prompt::confirm(message.as_str())
                    .default(*default)
                    .mandatory(false);
                if let Some(letter) = confirm_letter {
                    builder = builder.confirm_letter(letter);
                }
                if let Some(letter) = reject_letter {
                    builder = builder.reject_letter(letter);
                }
                builder
            }
            Self::Input {
                message,
                default,
                multiline,
                words,
                regex,
            } => {
                let mut builder = Prompt::input(message.as_str())
                    .multiline(*multiline)
                    .mandatory(false);
                if let Some(default) = default {
                    builder = builder.default(default.as_str());
                }
                if !words.is_empty() {
                    builder = builder.completer(crate::completions::WordCompleter::new(words));
                }
                if let Some(pattern) = regex {
                    builder = builder.validate_regex(pattern);
                }
                builder
            }
            Self::Secret { message, required } => {
                let builder = Prompt::secret(message.as_str()).mandatory(*required);
                if *required {
                    builder.validate(crate::validation::EmptyInputValidator::default())
                } else {
                    builder
                }
            }
            Self::Path {
                message,
                default,
                dirs,
                files,
                exists,
                base,
            } => {
                let mut builder = Prompt::filepath(message.as_str())
                    .only_directories(*dirs)
                    .only_files(*files)
                    .mandatory(false);
                if let Some(default) = default {
                    builder = builder.default(default.as_str());
                }
                if let Some(base) = base {
                    builder = builder.base_dir(base.clone());
                }
                if *exists {
                    builder = builder.validate(
                        crate::validation::PathValidator::default()
                            .is_dir(*dirs)
                            .is_file(*files),
                    );
                }
                builder
            }
            Self::Select {
                message,
                choices,
                default,
            } => {
                let mut builder = Prompt::select(message.as_str(), choices.clone()).mandatory(false);
                if let Some(default) = default {
                    builder = builder.default(default.as_str());
                }
                builder
            }
            Self::Checkbox {
                message,
                choices,
                defaults,
                required,
            } => {
                let builder = Prompt::checkbox(message.as_str(), choices.clone())
                    .default(defaults.clone())
                    .mandatory(*required);
                if *required {
                    builder
                        .validate_fn(|text| !text.is_empty())
                        .invalid_message("Select at least one choice")
                } else {
                    builder
                }
            }
        }
    }
}
