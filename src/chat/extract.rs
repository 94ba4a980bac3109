//! Message text extraction
//!
//! Normalizes raw message text before it reaches the transcript or the
//! suggestion controller. Messages with no visible text are rejected.

/// Upper bound on characters kept from a single message
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Extract the visible text of a message
///
/// Trims surrounding whitespace, drops control characters other than
/// newlines and tabs, and caps the length at [`MAX_MESSAGE_CHARS`].
/// Returns `None` when nothing visible remains.
pub fn extract_text(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .filter(|c| !is_zero_width(*c))
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return None;
    }

    let capped: String = trimmed.chars().take(MAX_MESSAGE_CHARS).collect();
    Some(capped.trim_end().to_string())
}

fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}')
}
