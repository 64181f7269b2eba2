//! Style classes for prompt fragments
//!
//! Every rendered fragment carries a class name (`questionmark`, `answer`,
//! `instruction`, ...). A [`Style`] maps those classes to style strings such
//! as `"#e5c07b bold"` or `"bg:#282c34 underline"` and resolves them to
//! `crossterm` content styles.
//!
//! Style strings are whitespace separated tokens:
//! - `bold`, `italic`, `underline`, `reverse`, `dim`, `hidden`, `blink`,
//!   `strike`
//! - `#rrggbb` or `#rgb` (foreground), `fg:<color>`, `bg:<color>`
//! - color names (`red`, `ansired`, `darkgray`, ...)
//! - `noinherit` and `noreverse`, accepted and ignored
//!
//! Unknown tokens are configuration errors.

use crate::error::{PromptError, Result};
use crossterm::style::{Attribute, Color, ContentStyle, StyledContent};
use std::collections::HashMap;

/// Default style string per class
pub const DEFAULT_CLASSES: &[(&str, &str)] = &[
    ("questionmark", "#e5c07b"),
    ("answermark", "#e5c07b"),
    ("answer", "#61afef"),
    ("input", "#98c379"),
    ("question", ""),
    ("answered_question", ""),
    ("instruction", "#abb2bf"),
    ("long_instruction", "#abb2bf"),
    ("pointer", "#61afef"),
    ("checkbox", "#98c379"),
    ("marker", "#e5c07b"),
    ("skipped", "#5c6370"),
    ("validator", "#e06c75"),
    ("completion", "#abb2bf"),
    ("completion.current", "reverse"),
    ("completion.meta", "#5c6370"),
];

/// A run of text rendered with one style class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Style class name
    pub class: String,
    /// Text, may contain newlines
    pub text: String,
}

impl Fragment {
    /// Create a fragment
    #[must_use]
    pub fn new(class: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            text: text.into(),
        }
    }
}

/// Concatenated text of `fragments`, ignoring styles
#[must_use]
pub fn plain_text(fragments: &[Fragment]) -> String {
    fragments.iter().map(|f| f.text.as_str()).collect()
}

/// Resolved class to style mapping
#[derive(Debug, Clone)]
pub struct Style {
    classes: HashMap<String, String>,
    resolved: HashMap<String, ContentStyle>,
}

impl Default for Style {
    fn default() -> Self {
        let classes: HashMap<String, String> = DEFAULT_CLASSES
            .iter()
            .map(|(class, style)| ((*class).to_string(), (*style).to_string()))
            .collect();
        // The defaults are known to parse.
        let resolved = classes
            .iter()
            .filter_map(|(class, style)| Some((class.clone(), parse_style(style).ok()?)))
            .collect();
        Self { classes, resolved }
    }
}

impl Style {
    /// Default classes with `overrides` applied on top
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] if any override does not parse.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self> {
        let mut style = Self::default();
        for (class, value) in overrides {
            style.set(class, value)?;
        }
        Ok(style)
    }

    /// Set one class
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] if `value` does not parse.
    pub fn set(&mut self, class: &str, value: &str) -> Result<()> {
        let parsed = parse_style(value)
            .map_err(|e| PromptError::invalid(format!("style for class '{class}': {e}")))?;
        self.classes.insert(class.to_string(), value.to_string());
        self.resolved.insert(class.to_string(), parsed);
        Ok(())
    }

    /// The style string configured for a class
    #[must_use]
    pub fn class_str(&self, class: &str) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    /// Content style for a class, plain when unknown
    #[must_use]
    pub fn get(&self, class: &str) -> ContentStyle {
        self.resolved.get(class).copied().unwrap_or_default()
    }

    /// Apply the style of `class` to `text`
    #[must_use]
    pub fn paint<'a>(&self, class: &str, text: &'a str) -> StyledContent<&'a str> {
        self.get(class).apply(text)
    }
}

/// Parse a style string into a content style
///
/// # Errors
///
/// Returns [`PromptError::InvalidArgument`] naming the first unknown token.
pub fn parse_style(value: &str) -> Result<ContentStyle> {
    let mut style = ContentStyle::new();
    for token in value.split_whitespace() {
        let lower = token.to_ascii_lowercase();
        match lower.as_str() {
            "bold" => style.attributes.set(Attribute::Bold),
            "italic" => style.attributes.set(Attribute::Italic),
            "underline" => style.attributes.set(Attribute::Underlined),
            "reverse" => style.attributes.set(Attribute::Reverse),
            "dim" => style.attributes.set(Attribute::Dim),
            "hidden" => style.attributes.set(Attribute::Hidden),
            "blink" => style.attributes.set(Attribute::SlowBlink),
            "strike" => style.attributes.set(Attribute::CrossedOut),
            "noinherit" | "noreverse" | "nobold" | "nounderline" | "noitalic" => {}
            _ => {
                if let Some(color) = lower.strip_prefix("bg:") {
                    style.background_color = Some(parse_color(color, token)?);
                } else {
                    let color = lower.strip_prefix("fg:").unwrap_or(&lower);
                    style.foreground_color = Some(parse_color(color, token)?);
                }
            }
        }
    }
    Ok(style)
}

fn parse_color(color: &str, token: &str) -> Result<Color> {
    if let Some(hex) = color.strip_prefix('#') {
        return parse_hex(hex)
            .ok_or_else(|| PromptError::invalid(format!("invalid color '{token}'")));
    }
    let name = color.strip_prefix("ansi").unwrap_or(color);
    let color = match name {
        "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "gray" | "grey" | "lightgray" => Color::Grey,
        "darkgray" | "darkgrey" | "brightblack" => Color::DarkGrey,
        "brightred" => Color::Red,
        "brightgreen" => Color::Green,
        "brightyellow" => Color::Yellow,
        "brightblue" => Color::Blue,
        "brightmagenta" => Color::Magenta,
        "brightcyan" => Color::Cyan,
        "white" => Color::White,
        _ => return Err(PromptError::invalid(format!("unknown style token '{token}'"))),
    };
    Ok(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        3 => {
            let mut rgb = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some(Color::Rgb {
                r: rgb.next()??,
                g: rgb.next()??,
                b: rgb.next()??,
            })
        }
        _ => None,
    }
}
