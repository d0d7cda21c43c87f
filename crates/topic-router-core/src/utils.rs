//! Utility functions.

/// Truncate a string to at most `max_chars` characters, respecting UTF-8
/// boundaries.
///
/// # Examples
///
/// ```
/// use topic_router_core::utils::truncate_str;
///
/// assert_eq!(truncate_str("Привет, мир!", 6), "Привет");
/// ```
pub fn truncate_str(s: impl AsRef<str>, max_chars: usize) -> String {
    let s = s.as_ref();
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    s.char_indices()
        .nth(max_chars)
        .map_or_else(|| s.to_string(), |(pos, _)| s[..pos].to_string())
}
