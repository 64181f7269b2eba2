//! File system path completion
//!
//! Completes the last path segment of the buffer against the entries of the
//! directory named by everything before it. Enumeration is lazy: entries are
//! read from the directory handle only as the caller pulls candidates.

use super::traits::{Completer, Completion, CompletionMeta, Document};
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Completer for file system paths
#[derive(Debug, Clone, Default)]
pub struct FilePathCompleter {
    only_directories: bool,
    only_files: bool,
    base_dir: Option<PathBuf>,
}

impl FilePathCompleter {
    /// Complete both files and directories relative to the working directory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only suggest directories
    #[must_use]
    pub const fn only_directories(mut self, only: bool) -> Self {
        self.only_directories = only;
        self
    }

    /// Only suggest non-directories
    #[must_use]
    pub const fn only_files(mut self, only: bool) -> Self {
        self.only_files = only;
        self
    }

    /// Resolve relative input against `dir` instead of the working directory
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Directory whose entries complete `directory_part`
    fn resolve_directory(&self, directory_part: &str) -> Option<PathBuf> {
        let normalized: String = directory_part
            .chars()
            .map(|c| if is_separator(c) { MAIN_SEPARATOR } else { c })
            .collect();

        let home_relative = normalized
            .strip_prefix('~')
            .filter(|rest| rest.is_empty() || rest.starts_with(MAIN_SEPARATOR));
        let path = if let Some(rest) = home_relative {
            let home = dirs::home_dir()?;
            let rest = rest.trim_start_matches(MAIN_SEPARATOR);
            if rest.is_empty() { home } else { home.join(rest) }
        } else if normalized.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(normalized)
        };

        match &self.base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path),
        }
    }
}

const fn is_separator(c: char) -> bool {
    c == '/' || c == '\\' || c == MAIN_SEPARATOR
}

/// Split input into the directory part (up to and including the last
/// separator) and the token being completed
#[must_use]
pub fn split_path(text: &str) -> (&str, &str) {
    text.rfind(is_separator)
        .map_or(("", text), |i| text.split_at(i + 1))
}

fn is_dir(path: &Path) -> bool {
    // Follows symlinks so a link to a directory completes as a directory
    path.is_dir()
}

impl Completer for FilePathCompleter {
    fn get_completions<'a>(
        &'a self,
        document: &Document<'_>,
    ) -> Box<dyn Iterator<Item = Completion> + 'a> {
        let (directory_part, token) = split_path(document.text_before_cursor());
        let Some(directory) = self.resolve_directory(directory_part) else {
            return Box::new(std::iter::empty());
        };

        let entries = match fs::read_dir(&directory) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::trace!(dir = %directory.display(), error = %e, "path completion skipped");
                return Box::new(std::iter::empty());
            }
        };

        let token = token.to_string();
        #[allow(clippy::cast_possible_wrap)]
        let start_position = -(token.chars().count() as isize);
        let show_hidden = token.starts_with('.');

        Box::new(entries.filter_map(Result::ok).filter_map(move |entry| {
            let name = entry.file_name().into_string().ok()?;
            if name.starts_with('.') && !show_hidden {
                return None;
            }
            if !name.starts_with(token.as_str()) {
                return None;
            }

            let dir = is_dir(&entry.path());
            if (self.only_directories && !dir) || (self.only_files && dir) {
                return None;
            }

            let completion = Completion::new(name.clone(), start_position);
            Some(if dir {
                completion
                    .with_display(format!("{name}{MAIN_SEPARATOR}"))
                    .with_meta(CompletionMeta::Directory)
            } else {
                completion.with_meta(CompletionMeta::File)
            })
        }))
    }
}
