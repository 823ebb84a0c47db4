use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// The boundary rule had no answer for a line pair. This is a gap in
    /// the classification rules, not a problem with the input.
    #[error("unclassified line pair: {last_line:?} followed by {new_line:?}")]
    UnclassifiedLinePair { last_line: String, new_line: String },
}
