//! Log sanitization utilities
//!
//! Keeps bearer tokens, passwords, and large catalogue pages out of debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading token characters kept visible by [`mask_secret`].
const VISIBLE_SECRET_PREFIX: usize = 6;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` bytes with a suffix indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a bearer token or password, keeping a short prefix for correlation.
pub fn mask_secret(secret: &str) -> String {
    if secret.len() <= VISIBLE_SECRET_PREFIX {
        "***".to_string()
    } else {
        format!(
            "{}***",
            &secret[..floor_char_boundary(secret, VISIBLE_SECRET_PREFIX)]
        )
    }
}
