//! Inline `[key::value]` annotations.

use serde::Serialize;

/// One `key::value` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prop {
    pub key: String,
    pub value: String,
}

impl Prop {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

const SEPARATOR: &str = "::";

/// Extracts every annotation in `text`, first to last, keeping duplicates.
///
/// The text is split on `::`. Each chunk before a separator yields a key
/// (whatever follows its last `[`), each chunk after one yields a value
/// (up to the `]` that balances the annotation's opening bracket).
pub fn extract_props(text: &str) -> Vec<Prop> {
    let mut chunks = text.split(SEPARATOR);
    let Some(first) = chunks.next() else {
        return vec![];
    };

    let mut props = vec![];
    let mut key = key_of(first);
    for chunk in chunks {
        props.push(Prop::new(key, value_of(chunk)));
        key = key_of(chunk);
    }
    props
}

fn key_of(chunk: &str) -> &str {
    chunk.rsplit('[').next().unwrap_or(chunk)
}

/// Value text up to the bracket closing the annotation.
///
/// Starts at depth one for the annotation's own `[`; nested brackets
/// inside the value raise the depth. Without a balancing `]` the whole
/// chunk is the value.
fn value_of(chunk: &str) -> &str {
    let mut depth = 1usize;
    for (i, c) in chunk.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return &chunk[..i];
                }
            }
            _ => {}
        }
    }
    chunk
}
