// src/utils/sanitize.rs

use ammonia::Builder;
use std::collections::HashSet;

/// Strips every HTML tag from staff-supplied question text.
///
/// The result is plain text: ammonia's serializer escapes `&`, `<`, `>` and
/// no-break spaces, and those escapes are undone so "Tom & Jerry" is stored
/// as typed.
pub fn clean_text(input: &str) -> String {
    let stripped = Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(input)
        .to_string();

    unescape_text(&stripped).trim().to_string()
}

/// Reverses the text-node escapes emitted by ammonia. `&amp;` goes last so an
/// escaped entity such as `&amp;lt;` decodes to the literal `&lt;`.
fn unescape_text(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}
