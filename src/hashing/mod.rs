//! BLAKE3 fingerprints for claims.

/// Full 32-byte BLAKE3 hash of a claim's exact text (no normalization).
#[inline]
pub fn hash_claim(claim: &str) -> [u8; 32] {
    *blake3::hash(claim.as_bytes()).as_bytes()
}

/// Short hex prefix of [`hash_claim`], used as a log field instead of the full claim.
pub fn claim_fingerprint(claim: &str) -> String {
    let hash = blake3::hash(claim.as_bytes());
    hash.to_hex()[..16].to_string()
}
