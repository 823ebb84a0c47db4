pub mod block_id;
pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list;
pub mod task;

pub use block_id::BlockId;
pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use heading::Heading;
pub use list::ListMarker;
pub use task::{Task, TaskState};

/// The substring of `text` up to its first space.
///
/// Marker detection only ever looks at this token; tabs do not split it.
pub fn first_word(text: &str) -> &str {
    text.split(' ').next().unwrap_or_default()
}
