use glob::Pattern;
use relative_path::{PathExt, RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

/// Read a markdown file relative to the vault root
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Recursively collect markdown files under `notes_root`, sorted.
///
/// Hidden directories (`.obsidian`, `.trash`, ...) are never entered.
/// Paths relative to `notes_root` that match any `ignore` pattern are
/// skipped, whole directories included.
pub fn scan_markdown_files(notes_root: &Path, ignore: &[Pattern]) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.is_dir() {
        return Err(IoError::InvalidNotesDir(format!(
            "notes directory not found: {}",
            notes_root.display()
        )));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, notes_root, ignore, &mut files)?;
    files.sort();
    Ok(files)
}

/// Like [`scan_markdown_files`], limited to `folder` inside the vault.
/// `ignore` patterns still match paths relative to `notes_root`.
pub fn scan_vault_folder(
    notes_root: &Path,
    folder: &RelativePath,
    ignore: &[Pattern],
) -> Result<Vec<PathBuf>, IoError> {
    let dir = folder.to_path(notes_root);
    if !dir.is_dir() {
        return Err(IoError::NotFound(dir));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &dir, ignore, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    root: &Path,
    dir: &Path,
    ignore: &[Pattern],
    files: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if is_ignored(root, &path, ignore) {
            continue;
        }

        if path.is_dir() {
            if is_hidden(&path) {
                continue;
            }
            scan_directory_recursive(root, &path, ignore, files)?;
        } else if path.is_file()
            && let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn is_ignored(root: &Path, path: &Path, ignore: &[Pattern]) -> bool {
    if ignore.is_empty() {
        return false;
    }
    let Ok(relative) = path.relative_to(root) else {
        return false;
    };
    ignore.iter().any(|p| p.matches(relative.as_str()))
}

/// Path of `path` relative to the vault root, for display and records.
pub fn vault_relative(root: &Path, path: &Path) -> Option<RelativePathBuf> {
    path.relative_to(root).ok()
}
