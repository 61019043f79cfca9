//! Reply normalization.
//!
//! The hosted model sometimes continues past its own answer and emits the
//! start of a new turn, leaving a dangling `User:` at the end of the text.
//! [`normalize_response`] removes exactly that artifact and nothing else.

/// Turn-taking marker the model hallucinates at the end of a completion.
pub const TURN_MARKER: &str = "User:";

/// Strip a trailing [`TURN_MARKER`] and trim the surrounding whitespace.
///
/// Text that does not end with the marker is returned unchanged. Stripping
/// repeats while the trimmed text still ends with the marker, so the
/// function is idempotent.
///
/// ```
/// use legalease_domain::normalize_response;
///
/// assert_eq!(normalize_response("Hello User:"), "Hello");
/// assert_eq!(normalize_response("Hello there"), "Hello there");
/// ```
pub fn normalize_response(raw: &str) -> String {
    let mut text = raw;
    while let Some(stripped) = text.strip_suffix(TURN_MARKER) {
        text = stripped.trim();
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_marker() {
        assert_eq!(normalize_response("Hello User:"), "Hello");
        assert_eq!(normalize_response("  A contract needs consideration.\n\nUser:"), "A contract needs consideration.");
    }

    #[test]
    fn leaves_other_text_unchanged() {
        assert_eq!(normalize_response("Hello there"), "Hello there");
        assert_eq!(normalize_response("  padded  "), "  padded  ");
        // Marker not at the very end
        assert_eq!(normalize_response("User: what now? "), "User: what now? ");
        assert_eq!(normalize_response("Ask the User: first"), "Ask the User: first");
        // Trailing whitespace after the marker means it does not end with it
        assert_eq!(normalize_response("Hello User: "), "Hello User: ");
    }

    #[test]
    fn marker_only_becomes_empty() {
        assert_eq!(normalize_response("User:"), "");
        assert_eq!(normalize_response(""), "");
    }

    #[test]
    fn repeated_markers_are_all_removed() {
        assert_eq!(normalize_response("Answer User: User:"), "Answer");
        assert_eq!(normalize_response("Answer User:User:"), "Answer");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "Hello User:",
            "Hello there",
            "Answer User: User:",
            "  spaced  User:",
            "User: User:",
            "Hello User: ",
            "",
        ];
        for sample in samples {
            let once = normalize_response(sample);
            assert_eq!(normalize_response(&once), once, "input: {sample:?}");
        }
    }
}
