//! Content hashing with domain separation.
//!
//! Algorithm: SHA-256 over `domain || data`. Domain prefixes are
//! null-terminated so no prefix is a prefix of another.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
///
/// Invariant: exactly one `:` separator with non-empty text on both sides
/// (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` for a missing colon, an empty algorithm, an empty
    /// digest, or a second colon.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full `"algorithm:hex_digest"` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Domain prefix for search trace digests.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"LODESTAR::SEARCH_TRACE::V1\0";

/// Domain prefix for search policy digests.
pub const DOMAIN_SEARCH_POLICY: &[u8] = b"LODESTAR::SEARCH_POLICY::V1\0";

/// Domain prefix for run report digests.
pub const DOMAIN_RUN_REPORT: &[u8] = b"LODESTAR::RUN_REPORT::V1\0";

/// Every domain prefix in use. New domains must be added here.
pub const ALL_DOMAINS: [&[u8]; 3] = [DOMAIN_SEARCH_TRACE, DOMAIN_SEARCH_POLICY, DOMAIN_RUN_REPORT];

/// Compute the canonical hash of `data` under `domain`.
///
/// Result format: `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let full = format!("sha256:{}", hex::encode(hasher.finalize()));
    ContentHash {
        colon: "sha256".len(),
        full,
    }
}
