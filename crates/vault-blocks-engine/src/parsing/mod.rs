pub mod blocks;
pub mod error;
pub mod rope;
pub mod snapshot;

use xi_rope::Rope;

use blocks::{BlockBuilder, BlockClassifier, ClassifyHook};
use rope::lines_with_spans;

pub use blocks::{Block, BlockType};
pub use error::SegmentError;

/// Configurable entry point for block segmentation.
#[derive(Debug, Clone)]
pub struct Segmenter {
    classifier: BlockClassifier,
    include_empty_blocks: bool,
}

impl Segmenter {
    pub fn new() -> Self {
        Self {
            classifier: BlockClassifier::new(),
            include_empty_blocks: true,
        }
    }

    /// When `false`, blocks whose trimmed text is empty are dropped after
    /// segmentation. Blank lines still separate blocks either way.
    pub fn include_empty_blocks(mut self, include: bool) -> Self {
        self.include_empty_blocks = include;
        self
    }

    /// Installs a classification overlay applied before the standard rules.
    pub fn with_hook(mut self, hook: impl ClassifyHook + 'static) -> Self {
        self.classifier = BlockClassifier::with_hook(hook);
        self
    }

    pub fn segment(&self, text: &str) -> Result<Vec<Block>, SegmentError> {
        self.segment_rope(&Rope::from(text))
    }

    pub fn segment_rope(&self, rope: &Rope) -> Result<Vec<Block>, SegmentError> {
        let blocks = lines_with_spans(rope)
            .try_fold(BlockBuilder::new(self.classifier.clone()), BlockBuilder::push)?
            .finish();

        if self.include_empty_blocks {
            return Ok(blocks);
        }
        Ok(blocks.into_iter().filter(|b| !b.is_blank()).collect())
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Segments `text` with default settings (empty blocks kept, no hook).
pub fn segment(text: &str) -> Result<Vec<Block>, SegmentError> {
    Segmenter::new().segment(text)
}
