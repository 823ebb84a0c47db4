use xi_rope::Rope;

use crate::parsing::blocks::Block;
use crate::parsing::rope::span::slice_to_string;

/// Validates that unfiltered segmentation output partitions the rope.
///
/// Asserts that:
/// - Block spans are in bounds, contiguous, and together cover the rope
/// - Line ranges are non-empty and contiguous from line 0
/// - Each block's text equals its spanned source with line terminators
///   normalised to `\n` and the final terminator dropped
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, blocks: &[Block]) {
    let n = rope.len();
    let mut offset = 0usize;
    let mut line = 0usize;

    for b in blocks {
        let span = b.span();
        assert!(
            span.start == offset && span.start <= span.end && span.end <= n,
            "block span not contiguous or out of bounds: {:?} (expected start {}, rope len {})",
            span,
            offset,
            n
        );
        let lines = b.lines();
        assert!(
            lines.start == line && lines.end > lines.start,
            "line range not contiguous: {:?} (expected start {})",
            lines,
            line
        );

        let source = slice_to_string(rope, span);
        let expected = source
            .split_inclusive('\n')
            .map(|l| {
                let l = l.strip_suffix('\n').unwrap_or(l);
                l.strip_suffix('\r').unwrap_or(l)
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(
            b.text(),
            expected,
            "block text does not match its source span {:?}",
            span
        );

        offset = span.end;
        line = lines.end;
    }

    assert_eq!(offset, n, "blocks do not cover the whole rope");
}
