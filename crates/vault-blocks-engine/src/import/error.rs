use std::path::PathBuf;

use thiserror::Error;

use crate::io::IoError;
use crate::models::NoteError;
use crate::parsing::SegmentError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Config note did not look right ({0}). Run `vault-blocks template` to see what it should look like.")]
    InvalidConfigNote(String),

    #[error("Failed to read config note at {path}: {source}")]
    ConfigNoteRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No \"#{tag}/\" subtag found in entry block of {path}")]
    MissingSubtag { tag: String, path: PathBuf },

    #[error("Cannot derive a period from note path {0}")]
    MissingPeriod(PathBuf),

    #[error(transparent)]
    Note(#[from] NoteError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Segment(#[from] SegmentError),
}
