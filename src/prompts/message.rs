//! Prompt message rendering
//!
//! Turns a prompt's status into the fragments of its question line:
//!
//! ```text
//! unanswered  questionmark  question " msg"  instruction " (Y/n) "
//! answered    answermark    answered_question " msg"  answer " Yes"
//! skipped     skipped qmark skipped " msg"
//! ```

use super::kind::PromptKind;
use super::options::PromptOptions;
use super::status::{Answer, Status};
use crate::style::Fragment;

/// Fragments of the question line for the given state
///
/// Pure: equal inputs always give equal output.
#[must_use]
pub fn render(
    status: &Status,
    options: &PromptOptions,
    kind: &PromptKind,
    message: &str,
    default: Option<&Answer>,
) -> Vec<Fragment> {
    if status.skipped {
        return vec![
            Fragment::new("skipped", options.qmark.clone()),
            Fragment::new("skipped", format!(" {message}")),
        ];
    }

    if status.answered {
        let display = status
            .result
            .as_ref()
            .map(|result| answer_display(result, options, kind))
            .unwrap_or_default();
        return vec![
            Fragment::new("answermark", options.amark.clone()),
            Fragment::new("answered_question", format!(" {message}")),
            Fragment::new("answer", format!(" {display}")),
        ];
    }

    let instruction = options
        .instruction
        .clone()
        .unwrap_or_else(|| kind.default_instruction(default));
    let mut fragments = vec![
        Fragment::new("questionmark", options.qmark.clone()),
        Fragment::new("question", format!(" {message}")),
    ];
    if kind.is_multiline() {
        // Only the built-in multiline hint goes without a trailing space
        let text = if options.instruction.is_some() {
            format!(" {instruction} ")
        } else {
            format!(" {instruction}")
        };
        fragments.push(Fragment::new("instruction", text));
        fragments.push(Fragment::new("questionmark", "\n❯ "));
    } else if instruction.is_empty() {
        fragments.push(Fragment::new("instruction", " "));
    } else {
        fragments.push(Fragment::new("instruction", format!(" {instruction} ")));
    }
    fragments
}

/// Text shown after the answered question
fn answer_display(result: &Answer, options: &PromptOptions, kind: &PromptKind) -> String {
    if let Some(transformer) = &options.transformer {
        return transformer(result);
    }
    match (kind, result) {
        (_, Answer::Bool(true)) => "Yes".to_string(),
        (_, Answer::Bool(false)) => "No".to_string(),
        (PromptKind::Secret, Answer::Text(text)) => "*".repeat(text.chars().count()),
        (_, Answer::Text(text)) => match text.split_once('\n') {
            Some((first, rest)) => format!("{first}...[{} chars]", rest.chars().count()),
            None => text.clone(),
        },
        (_, Answer::List(items)) => items.join(", "),
    }
}
