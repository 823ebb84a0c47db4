/// Caret-prefixed block identifiers (`^abc123`).
pub struct BlockId;

impl BlockId {
    pub const PREFIX: char = '^';

    /// A line holding nothing but an identifier token.
    pub fn is_standalone(line: &str) -> bool {
        let t = line.trim();
        t.starts_with(Self::PREFIX) && !t.contains(char::is_whitespace)
    }

    /// Identifier carried by the last word of a line, without the caret.
    pub fn trailing(line: &str) -> Option<&str> {
        line.split_whitespace()
            .next_back()?
            .strip_prefix(Self::PREFIX)
            .filter(|id| !id.is_empty())
    }

    /// First identifier found scanning `text` line by line.
    pub fn find(text: &str) -> Option<&str> {
        text.lines().find_map(Self::trailing)
    }
}
