use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::parsing::{Block, SegmentError, Segmenter};

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("Provided path does not point to a file: {0}")]
    NotAFile(PathBuf),
    #[error("File at path is not a Markdown file: {0}")]
    NotMarkdown(PathBuf),
    #[error("Failed to read note {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to segment note {path}: {source}")]
    Segment { path: PathBuf, source: SegmentError },
}

/// A markdown file loaded from a vault together with its blocks.
#[derive(Debug, Clone)]
pub struct Note {
    path: PathBuf,
    content: String,
    blocks: Vec<Block>,
    created: SystemTime,
    modified: SystemTime,
}

impl Note {
    /// Loads and segments the note at `path` with default settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NoteError> {
        Self::load_with(path, &Segmenter::new())
    }

    /// Loads the note at `path`, segmenting it with `segmenter`.
    pub fn load_with(path: impl AsRef<Path>, segmenter: &Segmenter) -> Result<Self, NoteError> {
        let path = path.as_ref();
        let read_err = |source| NoteError::Read {
            path: path.to_path_buf(),
            source,
        };

        let metadata = std::fs::metadata(path).map_err(read_err)?;
        if !metadata.is_file() {
            return Err(NoteError::NotAFile(path.to_path_buf()));
        }
        if path.extension().is_none_or(|ext| ext != "md") {
            return Err(NoteError::NotMarkdown(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(read_err)?;
        let modified = metadata.modified().map_err(read_err)?;
        // Not every platform records creation time.
        let created = metadata.created().unwrap_or(modified);

        Self::from_content_with(path, content, created, modified, segmenter)
    }

    /// Builds a note from text already in memory.
    pub fn from_content(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        created: SystemTime,
        modified: SystemTime,
    ) -> Result<Self, NoteError> {
        Self::from_content_with(path, content, created, modified, &Segmenter::new())
    }

    fn from_content_with(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        created: SystemTime,
        modified: SystemTime,
        segmenter: &Segmenter,
    ) -> Result<Self, NoteError> {
        let path = path.into();
        let content = content.into();
        let blocks = segmenter
            .segment(&content)
            .map_err(|source| NoteError::Segment {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            content,
            blocks,
            created,
            modified,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path component, extension included.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Directory containing the note.
    pub fn file_location(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// File name without its final extension, e.g. `2024-03-01` for a
    /// daily note. Periodic notes use this as their period.
    pub fn file_stem(&self) -> Option<&str> {
        self.path.file_stem().and_then(|n| n.to_str())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn created(&self) -> SystemTime {
        self.created
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }
}
