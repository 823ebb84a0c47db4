/// Backtick code fences.
pub struct CodeFence;

impl CodeFence {
    pub const DELIMITER: &'static str = "```";

    /// Whether the line opens (or is) a fence: trimmed text starts with three backticks.
    pub fn opens(line: &str) -> bool {
        line.trim().starts_with(Self::DELIMITER)
    }

    /// Whether the line closes an open fence: exactly three backticks once trimmed.
    pub fn closes(line: &str) -> bool {
        line.trim() == Self::DELIMITER
    }
}
