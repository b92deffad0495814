//! Splitting a raw submission into individual email bodies.

/// Split raw text on the configured separator token.
///
/// Segments are trimmed and empty segments dropped, so a submission that
/// starts or ends with the separator produces no phantom emails. Without the
/// separator the whole (trimmed) input is one email; blank input yields no
/// emails at all.
pub fn split_emails(text: &str, separator: &str) -> Vec<String> {
    if !separator.is_empty() && text.contains(separator) {
        return text
            .split(separator)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    }
}
