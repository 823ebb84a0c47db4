use std::sync::OnceLock;

use regex::Regex;

use super::first_word;

/// Bullet (`-`, `*`) and ordinal (`1.`, `2)`) list markers.
pub struct ListMarker;

impl ListMarker {
    pub const BULLETS: [&'static str; 2] = ["-", "*"];

    pub fn is_bullet(word: &str) -> bool {
        Self::BULLETS.contains(&word)
    }

    pub fn is_ordinal(word: &str) -> bool {
        static ORDINAL: OnceLock<Regex> = OnceLock::new();
        ORDINAL
            .get_or_init(|| Regex::new(r"^\d+[.)]$").expect("Invalid ordinal regex"))
            .is_match(word)
    }

    pub fn is_marker(word: &str) -> bool {
        Self::is_bullet(word) || Self::is_ordinal(word)
    }

    /// Whether the line is a list item at any indentation.
    pub fn is_item(line: &str) -> bool {
        Self::is_marker(first_word(line.trim()))
    }

    /// Whether the raw line opens an unindented list item.
    pub fn opens_item(raw_line: &str) -> bool {
        Self::is_marker(first_word(raw_line))
    }

    /// Indentation continuation: the raw line begins with a space or tab.
    pub fn is_continuation(raw_line: &str) -> bool {
        raw_line.starts_with([' ', '\t'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-", true)]
    #[case("*", true)]
    #[case("1.", true)]
    #[case("42)", true)]
    #[case("+", false)]
    #[case("1", false)]
    #[case("1.5", false)]
    #[case("a.", false)]
    #[case("--", false)]
    fn markers(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(ListMarker::is_marker(word), expected);
    }

    #[test]
    fn indented_item_is_an_item_but_does_not_open_one() {
        assert!(ListMarker::is_item("    - child"));
        assert!(!ListMarker::opens_item("    - child"));
        assert!(ListMarker::opens_item("- parent"));
        assert!(!ListMarker::is_item("    child"));
    }

    #[test]
    fn continuation_needs_leading_whitespace() {
        assert!(ListMarker::is_continuation("  more"));
        assert!(ListMarker::is_continuation("\tmore"));
        assert!(!ListMarker::is_continuation("more"));
    }
}
