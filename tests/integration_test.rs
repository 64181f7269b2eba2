//! Integration tests for askr prompts
//!
//! These tests drive complete prompt runs through scripted key input and
//! discard or capture the painted frames.

use askr::completions::WordCompleter;
use askr::config::AskrConfig;
use askr::keybinds::{KeybindOverrides, Key};
use askr::prompts::{Answer, Prompt, PromptBuilder, Status};
use askr::session::{CapturedOutput, DummyOutput, PipeInput};
use askr::style::plain_text;
use askr::validation::{NumberValidator, PasswordValidator, Validation, Validator};
use askr::PromptError;
use crossterm::event::KeyCode;
use std::fs;
use tempfile::TempDir;

/// Helper function to create scripted input
fn pipe(text: &str) -> PipeInput {
    let mut input = PipeInput::new();
    input.send_text(text);
    input
}

/// Helper function to build and run a prompt on scripted input
fn run(builder: PromptBuilder, keys: &str) -> (Prompt, askr::Result<Option<Answer>>) {
    let mut prompt = builder
        .input(pipe(keys))
        .output(DummyOutput)
        .build()
        .unwrap();
    let result = prompt.execute();
    (prompt, result)
}

/// Helper function to create a directory tree for path completion
fn create_test_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("beta")).unwrap();
    fs::create_dir(dir.path().join(".cache")).unwrap();
    fs::write(dir.path().join("alpha.txt"), b"a").unwrap();
    fs::write(dir.path().join("bravo.txt"), b"b").unwrap();
    dir
}

#[test]
fn test_confirm_enter_uses_default() {
    let (prompt, result) = run(Prompt::confirm("Proceed?").default(false), "\n");
    assert_eq!(result.unwrap(), Some(Answer::Bool(false)));
    assert_eq!(
        prompt.status(),
        &Status {
            answered: true,
            skipped: false,
            result: Some(Answer::Bool(false)),
        }
    );

    let (_, result) = run(Prompt::confirm("Proceed?").default(true), "\n");
    assert_eq!(result.unwrap(), Some(Answer::Bool(true)));
}

#[test]
fn test_confirm_letters_any_case() {
    for (keys, expected) in [("y", true), ("Y", true), ("n", false), ("N", false)] {
        let (_, result) = run(Prompt::confirm("Proceed?"), keys);
        assert_eq!(result.unwrap(), Some(Answer::Bool(expected)), "keys {keys:?}");
    }
}

#[test]
fn test_confirm_custom_letters() {
    let builder = || {
        Prompt::confirm("Sim?")
            .confirm_letter("s")
            .reject_letter("w")
    };
    let (prompt, result) = run(builder(), "S");
    assert_eq!(result.unwrap(), Some(Answer::Bool(true)));
    assert_eq!(plain_text(&prompt.prompt_message()), "? Sim? Yes");

    let (_, result) = run(builder(), "yw");
    assert_eq!(result.unwrap(), Some(Answer::Bool(false)));
}

#[test]
fn test_confirm_instruction_reflects_letters() {
    let prompt = Prompt::confirm("Sim?")
        .confirm_letter("s")
        .default(true)
        .build()
        .unwrap();
    assert_eq!(plain_text(&prompt.prompt_message()), "? Sim? (S/n) ");
}

#[tokio::test]
async fn test_confirm_async() {
    let mut prompt = Prompt::confirm("Proceed?")
        .input(pipe("y"))
        .output(DummyOutput)
        .build()
        .unwrap();
    assert_eq!(prompt.execute_async().await.unwrap(), Some(Answer::Bool(true)));
    assert!(prompt.status().answered);
}

#[test]
fn test_input_default_prefill() {
    let (prompt, result) = run(Prompt::input("Name").default("world"), "hello\n");
    assert_eq!(result.unwrap(), Some(Answer::from("worldhello")));
    assert_eq!(prompt.status().result, Some(Answer::from("worldhello")));
}

#[test]
fn test_input_filter_and_transformer() {
    let builder = Prompt::input("Name")
        .default("world")
        .filter(|answer| Answer::from(answer.to_string().repeat(2)))
        .transformer(|_| "what".to_string());
    let (prompt, result) = run(builder, "hello\n");
    assert_eq!(result.unwrap(), Some(Answer::from("worldhelloworldhello")));
    assert_eq!(prompt.status().result, Some(Answer::from("worldhello")));
    assert_eq!(plain_text(&prompt.prompt_message()), "? Name what");
}

#[test]
fn test_input_multiline() {
    let builder = Prompt::input("Story").multiline(true);
    let (prompt, result) = run(builder, "hello\nworld\nfoo\nboo\x1b\r");
    assert_eq!(result.unwrap(), Some(Answer::from("hello\nworld\nfoo\nboo")));
    assert_eq!(
        plain_text(&prompt.prompt_message()),
        "? Story hello...[13 chars]"
    );
}

#[test]
fn test_input_completion_with_words() {
    let builder = Prompt::input("Fruit").completer(WordCompleter::new(["apple", "apricot", "banana"]));
    let (_, result) = run(builder, "ap\t\t\n");
    assert_eq!(result.unwrap(), Some(Answer::from("apricot")));
}

#[tokio::test]
async fn test_input_async() {
    let mut prompt = Prompt::input("Name")
        .input(pipe("async\n"))
        .output(DummyOutput)
        .build()
        .unwrap();
    assert_eq!(prompt.execute_async().await.unwrap(), Some(Answer::from("async")));
}

#[test]
fn test_secret_default_and_mask() {
    let (prompt, result) = run(Prompt::secret("Password").default("yes"), "what\n");
    assert_eq!(result.unwrap(), Some(Answer::from("yeswhat")));
    assert_eq!(plain_text(&prompt.prompt_message()), "? Password *******");
}

#[test]
fn test_secret_validation_retry() {
    let output = CapturedOutput::new();
    let mut prompt = Prompt::secret("Password")
        .validate_fn(|text| text.len() >= 4)
        .input(pipe("abc\nd\n"))
        .output(output.clone())
        .build()
        .unwrap();
    assert_eq!(prompt.execute().unwrap(), Some(Answer::from("abcd")));
    assert!(output.frames().iter().any(|frame| frame.contains("Invalid input")));
    assert!(!output.last().unwrap_or_default().contains("Invalid input"));
}

#[test]
fn test_secret_password_validator() {
    let validator = PasswordValidator::default().length(6).number(true);
    let builder = Prompt::secret("Password").validate(validator);
    let (prompt, result) = run(builder, "abcdef\x08\x081\n");
    assert!(matches!(result, Err(PromptError::Eof)));
    assert!(!prompt.status().answered);

    let builder = Prompt::secret("Password").validate(PasswordValidator::default().length(6).number(true));
    let (_, result) = run(builder, "abcde1\n");
    assert_eq!(result.unwrap(), Some(Answer::from("abcde1")));
}

#[test]
fn test_custom_binding_exits() {
    let builder = Prompt::secret("Password")
        .bind("ctrl-x", |session| {
            session.exit(Some(Answer::from("yes")));
            Ok(())
        });
    let (prompt, result) = run(builder, "abc\x18");
    assert_eq!(result.unwrap(), Some(Answer::from("yes")));
    assert!(!prompt.status().answered);
    assert!(!prompt.status().skipped);
}

#[test]
fn test_custom_binding_conflicts() {
    let result = Prompt::input("Name").bind("enter", |_| Ok(())).build();
    assert!(matches!(result, Err(PromptError::InvalidArgument(_))));

    let result = Prompt::input("Name")
        .bind("ctrl-x", |_| Ok(()))
        .bind("ctrl-x", |_| Ok(()))
        .build();
    assert!(matches!(result, Err(PromptError::InvalidArgument(_))));
}

#[test]
fn test_keybinding_override() {
    let overrides = KeybindOverrides::new().with("skip", "ctrl-s");
    let builder = Prompt::input("Name").mandatory(false).keybindings(overrides);
    let (prompt, result) = run(builder, "ab\x13");
    assert_eq!(result.unwrap(), None);
    assert!(prompt.status().skipped);
}

#[test]
fn test_filepath_completion() {
    let dir = create_test_tree();
    let builder = Prompt::filepath("File").base_dir(dir.path());
    let (_, result) = run(builder, "al\t\n");
    assert_eq!(result.unwrap(), Some(Answer::from("alpha.txt")));
}

#[test]
fn test_filepath_only_directories() {
    let dir = create_test_tree();
    let builder = Prompt::filepath("Dir").base_dir(dir.path()).only_directories(true);
    let (_, result) = run(builder, "b\t\n");
    assert_eq!(result.unwrap(), Some(Answer::from("beta")));
}

#[test]
fn test_skip_when_not_mandatory() {
    let (prompt, result) = run(Prompt::input("Name").mandatory(false), "abc\x1a");
    assert_eq!(result.unwrap(), None);
    assert_eq!(
        prompt.status(),
        &Status {
            answered: false,
            skipped: true,
            result: None,
        }
    );
    assert_eq!(plain_text(&prompt.prompt_message()), "? Name");
}

#[test]
fn test_skip_refused_when_mandatory() {
    let output = CapturedOutput::new();
    let mut prompt = Prompt::input("Name")
        .mandatory_message("Answer required")
        .input(pipe("\x1aok\n"))
        .output(output.clone())
        .build()
        .unwrap();
    assert_eq!(prompt.execute().unwrap(), Some(Answer::from("ok")));
    assert!(output.frames().iter().any(|frame| frame.contains("Answer required")));
}

#[test]
fn test_keyboard_interrupt() {
    let (prompt, result) = run(Prompt::input("Name"), "\x03");
    assert!(matches!(result, Err(PromptError::KeyboardInterrupt)));
    assert!(!prompt.status().answered);

    let mut prompt = Prompt::input("Name")
        .input(pipe("\x03"))
        .output(DummyOutput)
        .build()
        .unwrap();
    assert_eq!(prompt.execute_with(false).unwrap(), None);
    assert!(prompt.status().skipped);
}

#[tokio::test]
async fn test_keyboard_interrupt_async() {
    let mut prompt = Prompt::confirm("Proceed?")
        .input(pipe("\x03"))
        .output(DummyOutput)
        .build()
        .unwrap();
    assert_eq!(prompt.execute_async_with(false).await.unwrap(), Some(Answer::Bool(false)));
    assert!(prompt.status().skipped);
}

#[test]
fn test_select_flow() {
    let builder = Prompt::select("Color", ["red", "green", "blue"]).default("green");
    let (prompt, result) = run(builder, "\x0e\n");
    assert_eq!(result.unwrap(), Some(Answer::from("blue")));
    assert_eq!(plain_text(&prompt.prompt_message()), "? Color blue");
}

#[test]
fn test_select_vi_keys() {
    let builder = Prompt::select("Color", ["red", "green", "blue"]).vi_mode(true);
    let (_, result) = run(builder, "kkj\n");
    assert_eq!(result.unwrap(), Some(Answer::from("blue")));
}

#[test]
fn test_checkbox_flow() {
    let mut input = PipeInput::new();
    input.send_text(" ");
    input.send_key(Key::plain(KeyCode::Down));
    input.send_key(Key::plain(KeyCode::Down));
    input.send_text(" \n");
    let mut prompt = Prompt::checkbox("Toppings", ["cheese", "ham", "olives"])
        .input(input)
        .output(DummyOutput)
        .build()
        .unwrap();
    assert_eq!(
        prompt.execute().unwrap(),
        Some(Answer::from(vec!["cheese", "olives"]))
    );
    assert_eq!(plain_text(&prompt.prompt_message()), "? Toppings cheese, olives");
}

#[test]
fn test_checkbox_validation() {
    let output = CapturedOutput::new();
    let mut prompt = Prompt::checkbox("Toppings", ["cheese", "ham"])
        .validate_fn(|text| !text.is_empty())
        .invalid_message("Pick one")
        .input(pipe("\n\x12\n"))
        .output(output.clone())
        .build()
        .unwrap();
    assert_eq!(
        prompt.execute().unwrap(),
        Some(Answer::from(vec!["cheese", "ham"]))
    );
    assert!(output.frames().iter().any(|frame| frame.contains("Pick one")));
}

#[test]
fn test_number_validator_on_input() {
    let builder = Prompt::input("Age").validate(NumberValidator::default());
    let (_, result) = run(builder, "4x\x7f2\n");
    assert_eq!(result.unwrap(), Some(Answer::from("42")));
}

#[test]
fn test_settings_from_config() {
    let config = AskrConfig {
        qmark: "[?]".to_string(),
        amark: "[!]".to_string(),
        ..AskrConfig::default()
    };
    let builder = Prompt::input("Name").settings(&config);
    let (prompt, result) = run(builder, "x\n");
    assert_eq!(result.unwrap(), Some(Answer::from("x")));
    assert_eq!(plain_text(&prompt.prompt_message()), "[!] Name x");
}

#[test]
fn test_rendered_frames() {
    let output = CapturedOutput::new();
    let mut prompt = Prompt::input("Name")
        .long_instruction("Type your name")
        .input(pipe("ab\n"))
        .output(output.clone())
        .build()
        .unwrap();
    prompt.execute().unwrap();

    let frames = output.frames();
    assert_eq!(frames[0], "? Name \nType your name");
    assert_eq!(frames[2], "? Name ab\nType your name");
    assert_eq!(output.last().unwrap(), "? Name ab");
}

/// Validator whose backing lookup is unreachable
struct UnreachableLookup;

impl Validator for UnreachableLookup {
    fn validate(&self, _text: &str) -> askr::Result<Validation> {
        Err(PromptError::Validator("lookup service unreachable".into()))
    }
}

#[test]
fn test_validator_failure_aborts_prompt() {
    let (prompt, result) = run(Prompt::input("Host").validate(UnreachableLookup), "db1\n");
    assert!(matches!(result, Err(PromptError::Validator(_))));
    assert!(!prompt.status().answered);
    assert!(!prompt.status().skipped);
    assert_eq!(prompt.status().result, None);
}
