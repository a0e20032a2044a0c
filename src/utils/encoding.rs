//! Byte-level encoding helpers.

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encode a string for use as a URL path segment.
///
/// Acceptance set matches WHATWG `encodeURIComponent`: ASCII alphanumerics
/// and `- _ . ! ~ * ' ( )` pass through, every other byte (UTF-8 sequences
/// included) becomes `%XX`.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        let unreserved = b.is_ascii_alphanumeric()
            || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')');
        if unreserved {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0f) as usize] as char);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreserved_passes_through() {
        assert_eq!(percent_encode("abc-XYZ_0.9!~*'()"), "abc-XYZ_0.9!~*'()");
    }

    #[test]
    fn test_spaces_and_separators() {
        assert_eq!(percent_encode("a AND b"), "a%20AND%20b");
        assert_eq!(percent_encode("a/b?c=d"), "a%2Fb%3Fc%3Dd");
    }

    #[test]
    fn test_coordinate_literal() {
        assert_eq!(
            percent_encode("[-22,-4,18] NOT emotion"),
            "%5B-22%2C-4%2C18%5D%20NOT%20emotion"
        );
    }

    #[test]
    fn test_multibyte_utf8() {
        assert_eq!(percent_encode("émotion"), "%C3%A9motion");
    }

    #[test]
    fn test_empty() {
        assert_eq!(percent_encode(""), "");
    }
}
