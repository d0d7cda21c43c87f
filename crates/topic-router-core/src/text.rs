//! Text normalization and tokenization.
//!
//! Both keywords and incoming messages go through [`normalize`] so that
//! matching is insensitive to case, spacing and the many apostrophe glyphs
//! used in Latin-script Uzbek (`o‘`, `g‘`, `ʼ`).

use lazy_regex::lazy_regex;
use std::collections::HashSet;

/// Apostrophe every apostrophe-like glyph is folded into.
pub const CANONICAL_APOSTROPHE: char = '\'';

/// Glyphs treated as apostrophes.
const APOSTROPHE_VARIANTS: &[char] = &[
    '\u{2019}', // ’
    '\u{2018}', // ‘
    '\u{02BC}', // ʼ
    '\u{02BB}', // ʻ
    '\u{0060}', // `
    '\u{00B4}', // ´
];

/// Word characters of any script, digits, apostrophe and hyphen.
static RE_TOKEN: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"[\w'-]+");

/// Canonicalize raw text for matching.
///
/// Folds apostrophes, lower-cases (Unicode, locale independent), trims and
/// collapses whitespace runs to a single space. Idempotent.
///
/// # Examples
///
/// ```
/// use topic_router_core::text::normalize;
///
/// assert_eq!(normalize("  Iʼjara   KVARTIRA\n"), "i'jara kvartira");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| {
            if APOSTROPHE_VARIANTS.contains(&c) {
                CANONICAL_APOSTROPHE
            } else {
                c
            }
        })
        .collect();

    folded
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split normalized text into word tokens.
///
/// Duplicates are kept; callers that only need membership use [`token_set`].
///
/// # Examples
///
/// ```
/// use topic_router_core::text::tokenize;
///
/// assert_eq!(tokenize("uy, kerak! olib-sotish"), vec!["uy", "kerak", "olib-sotish"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    RE_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Tokens of `text` as a set.
#[must_use]
pub fn token_set(text: &str) -> HashSet<&str> {
    RE_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}
