// netlytics-core/src/domain/governance/masking.rs
//
// One-way digests for PII columns. No salt and no lookup table: the same input
// always yields the same digest, so hashed identities can be joined across files.

use sha2::{Digest, Sha256};

/// Suffix appended to a column once its values are replaced by digests.
pub const DIGEST_SUFFIX: &str = "_hash";

/// Digest of a missing or blank value. Never produced by hashing.
pub const EMPTY_DIGEST: &str = "";

/// Hex length of a full SHA-256 digest.
pub const MAX_DIGEST_LENGTH: usize = 64;

/// Returns the first `digest_length` hex characters of the SHA-256 of the
/// trimmed, lowercased input. Blank input maps to [`EMPTY_DIGEST`].
pub fn anonymize(text: &str, digest_length: usize) -> String {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return EMPTY_DIGEST.to_string();
    }

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(digest_length.clamp(1, MAX_DIGEST_LENGTH));
    hex
}

/// `first_name` -> `first_name_hash`
pub fn digest_column_name(column: &str) -> String {
    format!("{}{}", column, DIGEST_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // sha256("john doe")
        assert_eq!(anonymize("John Doe", 8), "94890005");
        assert_eq!(anonymize("  JOHN DOE ", 8), "94890005");
    }

    #[test]
    fn test_length_and_alphabet() {
        for len in [4, 8, 16, 64] {
            let d = anonymize("jane.smith@email.com", len);
            assert_eq!(d.len(), len);
            assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
        assert_eq!(anonymize("x", 500).len(), MAX_DIGEST_LENGTH);
    }

    #[test]
    fn test_empty_sentinel() {
        assert_eq!(anonymize("", 8), EMPTY_DIGEST);
        assert_eq!(anonymize(" ", 8), EMPTY_DIGEST);
        assert_eq!(anonymize("\t\n", 8), EMPTY_DIGEST);
    }

    #[test]
    fn test_deterministic_and_distinct() {
        let inputs = [
            "https://linkedin.com/in/johndoe",
            "https://linkedin.com/in/janedoe",
            "Ünïcødé Nämé",
            "日本語の名前",
            "a",
            "b",
        ];
        let digests: Vec<String> = inputs.iter().map(|t| anonymize(t, 16)).collect();
        for (i, t) in inputs.iter().enumerate() {
            assert_eq!(anonymize(t, 16), digests[i]);
            for j in (i + 1)..inputs.len() {
                assert_ne!(digests[i], digests[j], "{} vs {}", inputs[i], inputs[j]);
            }
        }
    }

    #[test]
    fn test_digest_column_name() {
        assert_eq!(digest_column_name("email_address"), "email_address_hash");
    }
}
