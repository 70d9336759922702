//! RFC 3986 percent-encoding.

use tr4c3_error::{SigningError, SigningResult};

/// Percent-encode a string for use in a signature base or header.
///
/// Every byte outside the unreserved set `A-Z a-z 0-9 - . _ ~` is written as
/// `%XX` with uppercase hex digits. Spaces become `%20`, never `+`.
///
/// # Examples
///
/// ```
/// use tr4c3_social::percent_encode;
///
/// assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
/// assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
/// ```
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decode a percent-encoded string.
///
/// Malformed escapes are kept verbatim. Fails when the decoded bytes are not
/// valid UTF-8.
pub fn percent_decode(input: &str) -> SigningResult<String> {
    urlencoding::decode(input)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| SigningError::encoding(format!("{:?} is not valid UTF-8 once decoded: {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_characters_are_escaped() {
        assert_eq!(percent_encode("!*'();:@&=+$,/?#[]"), "%21%2A%27%28%29%3B%3A%40%26%3D%2B%24%2C%2F%3F%23%5B%5D");
    }

    #[test]
    fn test_multibyte_characters_encode_per_byte() {
        assert_eq!(percent_encode("◆"), "%E2%97%86");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = percent_decode("%FF%FE").unwrap_err();
        assert!(matches!(err.kind(), tr4c3_error::SigningErrorKind::Encoding(_)));
    }
}
