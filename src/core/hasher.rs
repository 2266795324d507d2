//! BLAKE3 content-addressing of artifact identifiers.
//!
//! Intermediate outputs land in the scratch directory under a name derived
//! from the identifier alone, so re-running a plan overwrites the same
//! scratch files instead of accumulating new ones.

/// Hex digest of an identifier, safe to embed in a filename.
pub fn hash_identifier(identifier: &str) -> String {
    blake3::hash(identifier.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash_identifier("Pruned VG"), hash_identifier("Pruned VG"));
    }

    #[test]
    fn test_hash_distinguishes_identifiers() {
        assert_ne!(hash_identifier("VG"), hash_identifier("XG"));
    }

    #[test]
    fn test_hash_is_filename_safe_hex() {
        let h = hash_identifier("Haplotype-Pruned VG + NodeMapping");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
