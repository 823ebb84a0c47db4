/// Task checkbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Open,
    Completed,
    /// Any other single-character status, e.g. `- [?]` or `- [/]`.
    Other(char),
}

/// Task list items (`- [ ] `, `- [x] `, `- [?] `).
pub struct Task;

impl Task {
    pub const OPEN: &'static str = "- [ ] ";
    pub const COMPLETED: &'static str = "- [x] ";

    /// Checkbox state of already-trimmed text.
    ///
    /// The open and completed forms need their trailing space. The custom
    /// form takes a single non-whitespace status character and must be
    /// followed by a space or end the text. Punctuation such as `?` or `/`
    /// is a valid status, not only letters and digits.
    pub fn state(trimmed: &str) -> Option<TaskState> {
        if trimmed.starts_with(Self::OPEN) {
            return Some(TaskState::Open);
        }
        if trimmed.starts_with(Self::COMPLETED) {
            return Some(TaskState::Completed);
        }

        let rest = trimmed.strip_prefix("- [")?;
        let mut chars = rest.chars();
        let status = chars.next().filter(|c| !c.is_whitespace())?;
        let after = chars.as_str().strip_prefix(']')?;
        (after.is_empty() || after.starts_with(' ')).then_some(TaskState::Other(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- [ ] buy milk", Some(TaskState::Open))]
    #[case("- [x] done", Some(TaskState::Completed))]
    #[case("- [X] done", Some(TaskState::Other('X')))]
    #[case("- [?] maybe", Some(TaskState::Other('?')))]
    #[case("- [/] halfway", Some(TaskState::Other('/')))]
    #[case("- [3]", Some(TaskState::Other('3')))]
    #[case("- [ ]", None)]
    #[case("- [ab] two chars", None)]
    #[case("- [?]attached", None)]
    #[case("- plain item", None)]
    #[case("[ ] no bullet", None)]
    fn states(#[case] input: &str, #[case] expected: Option<TaskState>) {
        assert_eq!(Task::state(input), expected);
    }
}
