//! # Snapshot Testing Support
//!
//! Utilities for checking segmentation output in tests.
//!
//! ## Modules
//!
//! - **`normalize`**: Renders blocks as one stable line each for `insta`
//!   snapshot assertions, or as a serializable `Snap`
//! - **`invariants`**: Runtime checks that blocks partition the source
//!   (spans contiguous and in bounds, line ranges contiguous, text matches
//!   the spanned source)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{BlockSnap, Snap, normalize, render};
