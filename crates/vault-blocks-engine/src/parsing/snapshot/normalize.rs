use serde::Serialize;

use crate::parsing::blocks::{Block, Prop};

/// Serializable view of a segmented document.
#[derive(Debug, Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

/// Serializable view of one block.
#[derive(Debug, Serialize)]
pub struct BlockSnap {
    /// Short type name, e.g. `h1`, `ul`, `codeBlock`.
    pub kind: String,
    /// Source line range as `(start, end)`.
    pub lines: (usize, usize),
    pub text: String,
    pub id: Option<String>,
    pub props: Vec<Prop>,
}

pub fn normalize(blocks: &[Block]) -> Snap {
    let blocks = blocks
        .iter()
        .map(|b| BlockSnap {
            kind: b.block_type().to_string(),
            lines: (b.lines().start, b.lines().end),
            text: b.text().to_string(),
            id: b.id().map(str::to_string),
            props: b.props(),
        })
        .collect();
    Snap { blocks }
}

/// One line per block: type, line range, escaped text, then id and props
/// when present. Compact enough for inline snapshots.
pub fn render(blocks: &[Block]) -> String {
    normalize(blocks)
        .blocks
        .iter()
        .map(|b| {
            let mut line = format!("{} {}..{} {:?}", b.kind, b.lines.0, b.lines.1, b.text);
            if let Some(id) = &b.id {
                line.push_str(&format!(" id={id}"));
            }
            for p in &b.props {
                line.push_str(&format!(" [{}={}]", p.key, p.value));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
