use std::fmt;
use std::sync::Arc;

use super::kinds::{BlockQuote, CodeFence, Heading, ListMarker, Task, TaskState, first_word};
use super::types::BlockType;

/// Caller-supplied classification overlay.
///
/// A hook sees a finished block's whole text before the standard rules
/// run; returning `Some` overrides them.
pub trait ClassifyHook: Send + Sync {
    fn classify(&self, text: &str) -> Option<BlockType>;
}

impl<F> ClassifyHook for F
where
    F: Fn(&str) -> Option<BlockType> + Send + Sync,
{
    fn classify(&self, text: &str) -> Option<BlockType> {
        self(text)
    }
}

/// Marks any block containing `#<tag>` as a [`BlockType::TaggedEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHook {
    needle: String,
}

impl TagHook {
    /// `tag` is given without its leading `#`.
    pub fn new(tag: &str) -> Self {
        Self {
            needle: format!("#{tag}"),
        }
    }
}

impl ClassifyHook for TagHook {
    fn classify(&self, text: &str) -> Option<BlockType> {
        text.contains(&self.needle).then_some(BlockType::TaggedEntry)
    }
}

/// Classifies finished blocks: the optional hook first, then
/// [`determine_type`].
#[derive(Clone, Default)]
pub struct BlockClassifier {
    hook: Option<Arc<dyn ClassifyHook>>,
}

impl BlockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(hook: impl ClassifyHook + 'static) -> Self {
        Self {
            hook: Some(Arc::new(hook)),
        }
    }

    pub fn classify(&self, text: &str) -> BlockType {
        self.hook
            .as_ref()
            .and_then(|h| h.classify(text))
            .unwrap_or_else(|| determine_type(text))
    }
}

impl fmt::Debug for BlockClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockClassifier")
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// Standard block type of `text`, first matching rule wins:
/// headings, tasks, ordered then unordered lists, code, quote, empty, text.
pub fn determine_type(text: &str) -> BlockType {
    let trimmed = text.trim();
    let word = first_word(trimmed);

    if let Some(ty) = Heading::level(trimmed).and_then(BlockType::heading) {
        return ty;
    }
    match Task::state(trimmed) {
        Some(TaskState::Open) => return BlockType::OpenTask,
        Some(TaskState::Completed) => return BlockType::CompletedTask,
        Some(TaskState::Other(_)) => return BlockType::OtherTask,
        None => {}
    }
    if ListMarker::is_ordinal(word) {
        return BlockType::OrderedList;
    }
    if ListMarker::is_bullet(word) {
        return BlockType::UnorderedList;
    }
    if CodeFence::opens(trimmed) {
        return BlockType::CodeBlock;
    }
    if BlockQuote::starts(trimmed) {
        return BlockType::BlockQuote;
    }
    if trimmed.is_empty() {
        return BlockType::Empty;
    }
    BlockType::Text
}
