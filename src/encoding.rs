// Percent-encoding for query components and path segments.
//
// A plain encodeURIComponent-style pass is too aggressive for the character
// sets http://tools.ietf.org/html/rfc3986 allows in these positions:
//    query       = *( pchar / "/" / "?" )
//    segment     = *pchar
//    pchar       = unreserved / pct-encoded / sub-delims / ":" / "@"
//    unreserved  = ALPHA / DIGIT / "-" / "." / "_" / "~"
//    sub-delims  = "!" / "$" / "&" / "'" / "(" / ")"
//                   / "*" / "+" / "," / ";" / "="
// so the sets below leave the relevant pchar extras raw instead of
// round-tripping them through %XX escapes.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters percent-encoded in a query key or value. Besides the
/// URI-component unreserved set, `@ : $ ,` stay raw - they are legal pchars
/// in a query component.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'@')
    .remove(b':')
    .remove(b'$')
    .remove(b',');

/// Characters percent-encoded in a path segment. Same as `QUERY` except
/// `& = +` also stay raw, since they only carry meaning inside a query
/// string.
const SEGMENT: &AsciiSet = &QUERY.remove(b'&').remove(b'=').remove(b'+');

/// Encode `value` for use as a query-string key or value.
///
/// With `pct_encode_spaces` spaces stay `%20`; without it they are rewritten
/// to `+`. Every internal caller passes `true`, but both branches are part of
/// the contract.
pub fn encode_query(value: &str, pct_encode_spaces: bool) -> String {
    let encoded = utf8_percent_encode(value, QUERY).to_string();
    if pct_encode_spaces {
        encoded
    } else {
        encoded.replace("%20", "+")
    }
}

/// Encode `value` for use as a single path segment.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_keeps_rfc3986_pchar_extras() {
        assert_eq!(encode_query("a@b:c$d,e", true), "a@b:c$d,e");
        assert_eq!(encode_query("!*'()-._~", true), "!*'()-._~");
    }

    #[test]
    fn test_query_encodes_delimiters() {
        assert_eq!(encode_query("a/b?c#d", true), "a%2Fb%3Fc%23d");
        assert_eq!(encode_query("k&v=w+x", true), "k%26v%3Dw%2Bx");
        assert_eq!(encode_query("100%", true), "100%25");
    }

    #[test]
    fn test_query_space_handling() {
        assert_eq!(encode_query("a b", true), "a%20b");
        assert_eq!(encode_query("a b", false), "a+b");
    }

    #[test]
    fn test_query_literal_percent_sequence_is_not_a_space() {
        // "%20" in the input is a percent sign plus digits, not a space
        assert_eq!(encode_query("%20", false), "%2520");
    }

    #[test]
    fn test_query_encodes_non_ascii_as_utf8() {
        assert_eq!(encode_query("ø", true), "%C3%B8");
        assert_eq!(encode_query("日", true), "%E6%97%A5");
    }

    #[test]
    fn test_segment_keeps_extra_sub_delims() {
        assert_eq!(encode_segment("a&b=c+d"), "a&b=c+d");
        assert_eq!(encode_segment("a@b:c$d,e"), "a@b:c$d,e");
    }

    #[test]
    fn test_segment_still_encodes_slash_and_space() {
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("a b"), "a%20b");
        assert_eq!(encode_segment("a?b#c"), "a%3Fb%23c");
    }
}
