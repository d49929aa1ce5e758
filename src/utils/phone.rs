// src/utils/phone.rs

use std::sync::LazyLock;

use regex::Regex;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{6,20}$").expect("valid phone regex"));

static SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,20}$").expect("valid suffix regex"));

/// Strips spaces and dashes, then checks the result looks like a phone number.
///
/// Returns `None` when the input is not a usable phone number.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    PHONE_RE.is_match(&cleaned).then_some(cleaned)
}

/// Validates a trailing-digits fragment used for suffix lookups.
pub fn normalize_suffix(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    SUFFIX_RE.is_match(&cleaned).then_some(cleaned)
}
