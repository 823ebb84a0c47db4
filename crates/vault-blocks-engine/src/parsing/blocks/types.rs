use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::parsing::rope::span::Span;

use super::kinds::BlockId;
use super::props::{Prop, extract_props};

/// The kind of a finished block.
///
/// Variants are listed in classification priority order; see
/// [`determine_type`](super::classify::determine_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    /// Returned only by a [`ClassifyHook`](super::classify::ClassifyHook),
    /// e.g. blocks carrying a vault's entry tag.
    TaggedEntry,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    OpenTask,
    CompletedTask,
    OtherTask,
    OrderedList,
    UnorderedList,
    CodeBlock,
    BlockQuote,
    Empty,
    Text,
}

impl BlockType {
    /// Heading type for a level in `1..=6`.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            4 => Some(Self::Heading4),
            5 => Some(Self::Heading5),
            6 => Some(Self::Heading6),
            _ => None,
        }
    }

    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Heading4 => Some(4),
            Self::Heading5 => Some(5),
            Self::Heading6 => Some(6),
            _ => None,
        }
    }

    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TaggedEntry => "taggedEntry",
            Self::Heading1 => "h1",
            Self::Heading2 => "h2",
            Self::Heading3 => "h3",
            Self::Heading4 => "h4",
            Self::Heading5 => "h5",
            Self::Heading6 => "h6",
            Self::OpenTask => "openTask",
            Self::CompletedTask => "completedTask",
            Self::OtherTask => "otherTask",
            Self::OrderedList => "ol",
            Self::UnorderedList => "ul",
            Self::CodeBlock => "codeBlock",
            Self::BlockQuote => "blockQuote",
            Self::Empty => "empty",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// A contiguous run of source lines treated as one semantic unit.
///
/// Built only by the segmenter and never mutated afterwards. `props` and
/// `id` are derived from the text each time they are asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    text: String,
    #[serde(rename = "type")]
    block_type: BlockType,
    span: Span,
    lines: Range<usize>,
}

impl Block {
    pub(crate) fn new(text: String, block_type: BlockType, span: Span, lines: Range<usize>) -> Self {
        Self {
            text,
            block_type,
            span,
            lines,
        }
    }

    /// Raw block text: its source lines joined with `\n`, terminators dropped.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// Byte span of the block in the source, line terminators included.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Zero-based source line indices covered by the block.
    pub fn lines(&self) -> Range<usize> {
        self.lines.clone()
    }

    pub fn first_line(&self) -> &str {
        self.text.split('\n').next().unwrap_or_default()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// `[key::value]` annotations in order of appearance, duplicates kept.
    pub fn props(&self) -> Vec<Prop> {
        extract_props(&self.text)
    }

    /// First caret identifier found on any line, without the caret.
    pub fn id(&self) -> Option<&str> {
        BlockId::find(&self.text)
    }
}
