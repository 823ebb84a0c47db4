use crate::parsing::error::SegmentError;

use super::classify::determine_type;
use super::kinds::{BlockId, BlockQuote, CodeFence, Heading, ListMarker, first_word};
use super::types::BlockType;

/// Decides whether `new_line` continues the block whose last physical line
/// is `last_line`. Rules are tried in order and the first match decides.
///
/// Both arguments are raw lines: indentation matters for list
/// continuation, so callers must not trim them.
///
/// # Errors
/// [`SegmentError::UnclassifiedLinePair`] when no rule matches.
pub fn same_block(last_line: &str, new_line: &str) -> Result<bool, SegmentError> {
    let last = last_line.trim();
    let new = new_line.trim();

    // An open fence absorbs everything; closing it is the builder's job.
    if CodeFence::opens(last) {
        return Ok(true);
    }
    if last.is_empty() || new.is_empty() {
        return Ok(false);
    }
    // Identifiers attach to whatever precedes them, headings included.
    if BlockId::is_standalone(new) {
        return Ok(true);
    }
    if Heading::is_marker(first_word(last)) || Heading::is_marker(first_word(new)) {
        return Ok(false);
    }
    if BlockQuote::starts(last) && BlockQuote::starts(new) {
        return Ok(true);
    }
    if CodeFence::opens(new) || BlockQuote::starts(new) {
        return Ok(false);
    }
    if ListMarker::opens_item(new_line) {
        return Ok(false);
    }
    if BlockQuote::starts(last) {
        return Ok(false);
    }
    if ListMarker::is_item(last) {
        return Ok(ListMarker::is_continuation(new_line));
    }
    // An indented item nests only under a line that is itself indented
    // list content; after a flush-left paragraph it opens a new list.
    if ListMarker::is_item(new) {
        return Ok(ListMarker::is_continuation(last_line));
    }
    if determine_type(last) == BlockType::Text && determine_type(new) == BlockType::Text {
        return Ok(true);
    }

    Err(SegmentError::UnclassifiedLinePair {
        last_line: last_line.to_string(),
        new_line: new_line.to_string(),
    })
}
