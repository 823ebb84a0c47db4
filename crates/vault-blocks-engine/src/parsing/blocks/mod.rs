//! # Block Segmentation
//!
//! Splits a note into the blocks a note-editing app would hand out block
//! references for: paragraphs, headings, list items, tasks, quotes and
//! code fences.
//!
//! ## Phases
//!
//! 1. **Boundary decision** (`boundary`): `same_block` looks at the last
//!    physical line of the open block and the incoming line and decides
//!    whether they belong together.
//! 2. **Accumulation** (`builder`): `BlockBuilder` is the fold state that
//!    threads the open block (plain lines or an unclosed fence) through
//!    the document in one pass.
//! 3. **Classification** (`classify`): finished blocks get a `BlockType`,
//!    with an optional caller hook taking precedence.
//!
//! ## Modules
//!
//! - **`kinds`**: Marker syntax per construct (headings, lists, tasks,
//!   fences, quotes, block ids)
//! - **`types`**: `Block` and `BlockType`
//! - **`props`**: `[key::value]` annotation extraction
//!
//! ## Key Invariants
//!
//! - Every source line lands in exactly one block, in order
//! - Headings never share a block with a neighbour, except a trailing
//!   `^id` line
//! - An unterminated fence absorbs the rest of the document

pub mod boundary;
pub mod builder;
pub mod classify;
pub mod kinds;
pub mod props;
pub mod types;

pub use boundary::same_block;
pub use builder::BlockBuilder;
pub use classify::{BlockClassifier, ClassifyHook, TagHook, determine_type};
pub use props::{Prop, extract_props};
pub use types::{Block, BlockType};
