//! Request signature construction.
//!
//! ## Format
//!
//! ```text
//! StringToSign = METHOD + ":" + PATH + ":" + AUTH_TOKEN + ":" + BODY_SHA256_HEX + ":" + TIMESTAMP
//! Signature    = lowercase_hex(HMAC-SHA256(SecretKey, StringToSign))
//! ```
//!
//! `PATH` is the relative URL including the sorted query string, exactly as
//! sent on the wire. Both functions are pure; identical inputs always yield
//! identical output.

use crate::hash::hex_hmac_sha256;
use http::Method;

/// Construct the string to sign for one request.
pub fn string_to_sign(
    method: &Method,
    path_and_query: &str,
    auth_token: &str,
    body_sha256_hex: &str,
    timestamp: &str,
) -> String {
    format!("{method}:{path_and_query}:{auth_token}:{body_sha256_hex}:{timestamp}")
}

/// Sign the string to sign with the secret key.
///
/// Returns the lowercase hex HMAC-SHA256 digest carried in the signature
/// header.
pub fn sign(secret_key: &str, string_to_sign: &str) -> String {
    hex_hmac_sha256(secret_key.as_bytes(), string_to_sign.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::EMPTY_STRING_SHA256;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_to_sign_format() {
        let s = string_to_sign(
            &Method::GET,
            "/banking/v3/corporates/1/accounts/001",
            "token123",
            EMPTY_STRING_SHA256,
            "2024-01-01T10:00:00.000+0700",
        );

        assert_eq!(
            s,
            "GET:/banking/v3/corporates/1/accounts/001:token123:\
e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855:\
2024-01-01T10:00:00.000+0700"
        );
    }

    #[test]
    fn test_sign_known_value() {
        let s = string_to_sign(
            &Method::GET,
            "/banking/v3/corporates/1/accounts/001",
            "token123",
            EMPTY_STRING_SHA256,
            "2024-01-01T10:00:00.000+0700",
        );

        assert_eq!(
            sign("secret", &s),
            "d853db14450143075d2d64a3f0320078f21abdf9fe795d64136087e7b25c91e6"
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let s = string_to_sign(
            &Method::POST,
            "/banking/corporates/transfers",
            "token123",
            "4eee2207438c5e75f664f00db5e51b5a2241c6a8ac65fbfb68b67bd4a92cd057",
            "2024-01-01T10:00:00.000+0700",
        );

        assert_eq!(sign("secret", &s), sign("secret", &s));
    }

    #[test]
    fn test_sign_differs_by_key() {
        let s = string_to_sign(
            &Method::GET,
            "/general/rate/deposit",
            "token123",
            EMPTY_STRING_SHA256,
            "2024-01-01T10:00:00.000+0700",
        );

        assert_ne!(sign("secret", &s), sign("another-secret", &s));
    }
}
