//! Shared helpers for unit tests that need a vault on disk.

use std::path::PathBuf;

use tempfile::TempDir;

pub fn create_test_notes_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Writes `content` at `relative` under the vault, creating parent folders.
pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
