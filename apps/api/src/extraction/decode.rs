//! Percent-decoding of run fragments with URI-component strictness.

use std::borrow::Cow;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunDecodeError {
    #[error("malformed escape at byte {offset}")]
    MalformedEscape { offset: usize },

    #[error("escaped bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Decodes a percent-encoded fragment.
///
/// Every `%` must introduce exactly two hex digits and the decoded bytes must
/// form valid UTF-8. `+` is left untouched.
pub fn decode_run(encoded: &str) -> Result<Cow<'_, str>, RunDecodeError> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Err(RunDecodeError::MalformedEscape { offset: i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(encoded).map_err(|_| RunDecodeError::InvalidUtf8)
}

/// Decodes a fragment, or hands back the original text when it cannot be
/// decoded. A single bad run must never fail the document.
pub fn decode_or_passthrough(encoded: &str) -> Cow<'_, str> {
    match decode_run(encoded) {
        Ok(decoded) => decoded,
        Err(e) => {
            // Content stays out of the logs; length is enough to correlate.
            tracing::debug!(len = encoded.len(), "run decode failed, passing through: {e}");
            Cow::Borrowed(encoded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_standard_escapes() {
        assert_eq!(
            decode_run("With%20special%20chars%3A%20%26%20more").unwrap(),
            "With special chars: & more"
        );
    }

    #[test]
    fn test_decodes_multibyte_utf8() {
        assert_eq!(decode_run("Caf%C3%A9%20%E2%80%93").unwrap(), "Café –");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(decode_run("Rust").unwrap(), Cow::Borrowed("Rust")));
    }

    #[test]
    fn test_plus_is_not_a_space() {
        assert_eq!(decode_run("C%2B%2B+Go").unwrap(), "C+++Go");
    }

    #[test]
    fn test_trailing_bare_percent_is_malformed() {
        assert_eq!(
            decode_run("50%"),
            Err(RunDecodeError::MalformedEscape { offset: 2 })
        );
    }

    #[test]
    fn test_non_hex_escape_is_malformed() {
        assert_eq!(
            decode_run("%zz%20"),
            Err(RunDecodeError::MalformedEscape { offset: 0 })
        );
    }

    #[test]
    fn test_truncated_escape_is_malformed() {
        assert_eq!(
            decode_run("ab%4"),
            Err(RunDecodeError::MalformedEscape { offset: 2 })
        );
    }

    #[test]
    fn test_invalid_utf8_sequence_is_rejected() {
        assert_eq!(decode_run("%C3%28"), Err(RunDecodeError::InvalidUtf8));
    }

    #[test]
    fn test_passthrough_returns_original_fragment() {
        assert_eq!(decode_or_passthrough("50%"), "50%");
        // Valid escapes elsewhere in a bad fragment are not half-decoded.
        assert_eq!(decode_or_passthrough("100%25%20up%"), "100%25%20up%");
        assert_eq!(decode_or_passthrough("%C3%28"), "%C3%28");
    }

    #[test]
    fn test_passthrough_decodes_good_fragment() {
        assert_eq!(decode_or_passthrough("Page%202"), "Page 2");
    }
}
