/// Cheap token estimate: ceil(chars / 4).
///
/// Intentionally crude. History trimming only needs a stable, deterministic
/// proxy for model token count, and tests rely on this exact formula.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("a"), 1);
    }

    #[test]
    fn test_longer_text() {
        // 26 chars / 4 = 6.5 -> 7
        assert_eq!(estimate_tokens("abcdefghijklmnopqrstuvwxyz"), 7);
    }
}
