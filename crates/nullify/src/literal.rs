//! Canned byte literals shared by every codec.

/// Structured null
pub const NULL: &[u8] = b"null";

/// Structured `true`
pub const TRUE: &[u8] = b"true";

/// Structured `false`
pub const FALSE: &[u8] = b"false";

/// Text null. Text has no null literal, so absence is the empty string.
pub const EMPTY: &[u8] = b"";

/// Structured input that resets a wrapper to null
pub(crate) fn is_json_null(data: &[u8]) -> bool {
    data.is_empty() || data == NULL
}

/// Text input that resets a wrapper to null
pub(crate) fn is_text_null(data: &[u8]) -> bool {
    data == EMPTY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_detection() {
        assert!(is_json_null(b""));
        assert!(is_json_null(NULL));
        assert!(!is_json_null(b" null"));
        assert!(!is_json_null(FALSE));

        assert!(is_text_null(b""));
        assert!(!is_text_null(b"0"));
        assert!(!is_text_null(NULL));
    }
}
