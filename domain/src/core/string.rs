//! Text helpers.

/// Shorten `text` to at most `limit` bytes, ending in `...` when cut.
///
/// The cut never splits a character. Used for log previews and error excerpts.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let cut = (0..=limit.saturating_sub(3))
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}...", &text[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched_and_long_text_is_cut() {
        assert_eq!(truncate("contract", 10), "contract");
        assert_eq!(truncate("breach of contract", 9), "breach...");
    }

    #[test]
    fn cut_backs_off_to_char_boundary() {
        // 'é' is 2 bytes; cutting at byte 4 would land inside it
        assert_eq!(truncate("clé clé clé", 6), "cl...");
    }

    #[test]
    fn wide_characters_are_kept_whole() {
        assert_eq!(truncate("⚖️⚖️⚖️", 100), "⚖️⚖️⚖️");
        // 4 bytes each: the cut may end at byte 7, so it backs off to 4
        assert_eq!(truncate("🧑🧑🧑", 10), "🧑...");
    }
}
