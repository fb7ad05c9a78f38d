//! Field helpers for structured logging

const PREVIEW_CHARS: usize = 80;

/// Shorten free text (a chat message, an upstream error body) for a log line.
///
/// Cuts on a character boundary and appends "..." when truncated.
///
/// # Examples
///
/// ```
/// use advisor::logging::message_preview;
///
/// assert_eq!(message_preview("Which crop for red soil?"), "Which crop for red soil?");
/// assert!(message_preview(&"a".repeat(200)).ends_with("..."));
/// ```
pub fn message_preview(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
