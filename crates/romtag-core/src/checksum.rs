//! SHA-256 keys for the query cache.

use sha2::{Digest, Sha256};

/// Compute the cache key for a (query, subject) pair.
///
/// The two parts are separated by a NUL byte so that no pair of distinct
/// inputs can concatenate to the same digest input.
pub fn cache_key(query: &str, subject: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    hasher.update([0u8]);
    hasher.update(subject.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_stable() {
        let a = cache_key("driver/@status", "pacman");
        let b = cache_key("driver/@status", "pacman");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_cache_key_separates_parts() {
        assert_ne!(cache_key("ab", "c"), cache_key("a", "bc"));
        assert_ne!(
            cache_key("driver/@status", "pacman"),
            cache_key("driver/@status", "mspacman")
        );
    }
}
