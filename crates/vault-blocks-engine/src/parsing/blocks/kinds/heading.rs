/// ATX heading syntax (`# ` through `###### `).
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: u8 = 6;

    const PREFIXES: [&'static str; 6] = ["# ", "## ", "### ", "#### ", "##### ", "###### "];

    /// Heading level of already-trimmed text, tested against each literal
    /// prefix. A bare run of `#` with nothing after it is not a heading.
    pub fn level(trimmed: &str) -> Option<u8> {
        Self::PREFIXES
            .iter()
            .position(|p| trimmed.starts_with(p))
            .map(|i| i as u8 + 1)
    }

    /// True when `word` is one to six `#` and nothing else.
    pub fn is_marker(word: &str) -> bool {
        (1..=Self::MAX_LEVEL as usize).contains(&word.len())
            && word.chars().all(|c| c == Self::MARKER)
    }
}
