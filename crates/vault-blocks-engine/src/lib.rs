pub mod import;
pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use import::{EntryRecord, ImportError, Importer, VaultConfig};
pub use models::{Note, NoteError};
pub use parsing::blocks::{
    Block, BlockType, ClassifyHook, Prop, TagHook, determine_type, same_block,
};
pub use parsing::{SegmentError, Segmenter, segment};
