// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_daily_note(entries: usize) -> String {
    let mut content = String::from("# 2024-03-01\n\n");
    for i in 0..entries {
        content.push_str(&format!(
            "- {:02}:{:02} #pdw/Run [km::{}] [mood::fine] ^e{i}\n\t- [pace::steady]\n",
            i % 24,
            i % 60,
            i % 10
        ));
    }
    content
}

#[allow(dead_code)]
pub fn generate_mixed_markdown(sections: usize) -> String {
    let base = "## Section\n\nParagraph with some content\nthat continues here.\n^para\n\n- Bullet point\n  - Nested item\n- [ ] Task\n- [x] Done\n1. First\n\n> Quote\n> more\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(sections)
}
