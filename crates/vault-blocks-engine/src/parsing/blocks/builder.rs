use crate::parsing::error::SegmentError;
use crate::parsing::rope::{lines::LineRef, span::Span};

use super::boundary::same_block;
use super::classify::BlockClassifier;
use super::kinds::{BlockId, CodeFence};
use super::types::Block;

/// Lines accumulated for the block currently open.
#[derive(Debug, Clone)]
struct Pending {
    lines: Vec<String>,
    span: Span,
    first_line: usize,
}

impl Pending {
    fn start(line: &LineRef) -> Self {
        Self {
            lines: vec![line.content().to_string()],
            span: line.span,
            first_line: line.index,
        }
    }

    fn extend(mut self, line: &LineRef) -> Self {
        self.lines.push(line.content().to_string());
        self.span = self.span.cover(line.span);
        self
    }

    /// Line the boundary rule compares the next line against. Trailing
    /// standalone `^id` lines are skipped unless the block has nothing else.
    fn last_line(&self) -> &str {
        self.lines
            .iter()
            .rev()
            .find(|line| !BlockId::is_standalone(line))
            .or(self.lines.last())
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn into_block(self, classifier: &BlockClassifier) -> Block {
        let text = self.lines.join("\n");
        let block_type = classifier.classify(&text);
        let lines = self.first_line..self.first_line + self.lines.len();
        Block::new(text, block_type, self.span, lines)
    }
}

#[derive(Debug, Clone)]
enum OpenBlock {
    None,
    Lines(Pending),
    /// An unclosed code fence: only a bare ``` line ends it.
    Fence(Pending),
}

impl OpenBlock {
    fn start(line: &LineRef) -> Self {
        let pending = Pending::start(line);
        if CodeFence::opens(line.content()) {
            OpenBlock::Fence(pending)
        } else {
            OpenBlock::Lines(pending)
        }
    }
}

/// Left-fold state for segmentation.
///
/// Each [`push`](Self::push) consumes the builder and returns the next
/// state, so segmentation is `lines.try_fold(BlockBuilder::new(..), push)`.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    classifier: BlockClassifier,
    open: OpenBlock,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new(classifier: BlockClassifier) -> Self {
        Self {
            classifier,
            open: OpenBlock::None,
            out: vec![],
        }
    }

    /// Feeds the next source line.
    ///
    /// # Errors
    /// Propagates [`SegmentError::UnclassifiedLinePair`] from the boundary rule.
    pub fn push(mut self, line: LineRef) -> Result<Self, SegmentError> {
        self.open = match std::mem::replace(&mut self.open, OpenBlock::None) {
            OpenBlock::None => OpenBlock::start(&line),
            OpenBlock::Fence(pending) => {
                let pending = pending.extend(&line);
                if CodeFence::closes(line.content()) {
                    self.emit(pending);
                    OpenBlock::None
                } else {
                    OpenBlock::Fence(pending)
                }
            }
            OpenBlock::Lines(pending) => {
                if same_block(pending.last_line(), line.content())? {
                    OpenBlock::Lines(pending.extend(&line))
                } else {
                    self.emit(pending);
                    OpenBlock::start(&line)
                }
            }
        };
        Ok(self)
    }

    /// Flushes the open block, if any. An unterminated fence keeps
    /// everything it absorbed.
    pub fn finish(mut self) -> Vec<Block> {
        match std::mem::replace(&mut self.open, OpenBlock::None) {
            OpenBlock::None => {}
            OpenBlock::Lines(pending) | OpenBlock::Fence(pending) => self.emit(pending),
        }
        self.out
    }

    fn emit(&mut self, pending: Pending) {
        let block = pending.into_block(&self.classifier);
        self.out.push(block);
    }
}
