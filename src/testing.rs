//! Testing utilities for askr
//!
//! Fixtures shared by unit tests: a temporary directory tree for path
//! completion and validation, and helpers for scripting prompt input.
//!
//! Only available when compiled with `cfg(test)`.

use crate::session::{DummyOutput, PipeInput};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Temporary directory populated with empty files and directories
///
/// The directory is removed when the wrapper goes out of scope.
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    /// Create a tree containing the given directories and empty files
    ///
    /// # Panics
    /// Panics if the temporary directory or any entry cannot be created.
    pub fn new(dirs: &[&str], files: &[&str]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for name in dirs {
            fs::create_dir_all(dir.path().join(name)).expect("Failed to create test dir");
        }
        for name in files {
            fs::write(dir.path().join(name), b"").expect("Failed to create test file");
        }
        Self { dir }
    }

    /// Root of the tree
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Scripted input preloaded with `text`
#[must_use]
pub fn pipe(text: &str) -> PipeInput {
    let mut input = PipeInput::new();
    input.send_text(text);
    input
}

/// Output that discards every frame
#[must_use]
pub const fn dummy() -> DummyOutput {
    DummyOutput
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_tree_creates_entries() {
        let tree = TempTree::new(&["a"], &["b"]);
        assert!(tree.path().join("a").is_dir());
        assert!(tree.path().join("b").is_file());
    }

    #[test]
    fn test_temp_tree_cleanup() {
        let path = {
            let tree = TempTree::new(&[], &["x"]);
            tree.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
