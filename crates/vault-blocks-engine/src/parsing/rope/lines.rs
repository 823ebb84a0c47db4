use xi_rope::Rope;

use super::span::Span;

/// One physical line of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Zero-based line number.
    pub index: usize,
    /// Byte span of the line, terminator included.
    pub span: Span,
    /// Raw line text, terminator included.
    pub text: String,
}

impl LineRef {
    /// The line without its `\n` / `\r\n` terminator.
    pub fn content(&self) -> &str {
        let t = self.text.strip_suffix('\n').unwrap_or(&self.text);
        t.strip_suffix('\r').unwrap_or(t)
    }
}

/// Iterates the rope's lines with their spans.
///
/// A final `\n` terminates the last line rather than opening an empty one,
/// and an empty rope yields nothing.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(index, line)| {
        let start = offset;
        offset += line.len();
        LineRef {
            index,
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}
