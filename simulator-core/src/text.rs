/// Truncate `s` to at most `max` characters.
///
/// The cut is a raw character cut (no word-boundary adjustment) but always
/// lands on a char boundary, so multi-byte input never panics.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_exact_char_cut() {
        let s = "abcdef";
        assert_eq!(truncate_chars(s, 4), "abcd");
        assert_eq!(truncate_chars(s, 6), "abcdef");
        assert_eq!(truncate_chars(s, 100), "abcdef");
        assert_eq!(truncate_chars(s, 0), "");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let s = "ümlaut café";
        assert_eq!(truncate_chars(s, 6), "ümlaut");
        assert_eq!(char_len("café"), 4);
    }

    #[test]
    fn test_truncate_long_input() {
        let s = "x".repeat(5000);
        assert_eq!(truncate_chars(&s, 4000).len(), 4000);
    }
}
