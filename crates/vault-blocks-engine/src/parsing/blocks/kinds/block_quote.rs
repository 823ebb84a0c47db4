/// Block quote syntax.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: char = '>';

    /// Whether the trimmed line starts with `>`.
    pub fn starts(line: &str) -> bool {
        line.trim().starts_with(Self::PREFIX)
    }
}
