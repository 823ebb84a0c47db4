pub mod lines;
pub mod span;

pub use lines::{LineRef, lines_with_spans};
pub use span::{Span, slice_to_string};
