//! Configuration constants shared across the crate.

use std::time::Duration;

/// Safety margin applied to token expiry checks: a token expiring within
/// this window is treated as already expired.
pub const EXPIRY_SAFETY_MARGIN: Duration = Duration::from_secs(60);

/// Connect timeout for token-endpoint HTTP requests.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Overall timeout for token-endpoint HTTP requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Percent-encode a string for use in URL query parameters.
///
/// Encodes every byte outside the RFC 3986 unreserved set.
pub fn url_encode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encode_reserved_characters() {
        let encoded = url_encode("https://app.example/cb?x=1 2");
        assert!(encoded.contains("%3A")); // colon
        assert!(encoded.contains("%2F")); // slash
        assert!(encoded.contains("%3F")); // question mark
        assert!(encoded.contains("%20")); // space
        assert!(!encoded.contains(':'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn test_url_encode_unreserved_passthrough() {
        assert_eq!(url_encode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
    }
}
