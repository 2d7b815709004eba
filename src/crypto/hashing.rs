use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use super::{HASH_SALT_LEN, secure_random};
use crate::error::SecurityError;

/// Digest algorithms supported for salted field hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "BLAKE3")]
    Blake3,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Blake3 => "BLAKE3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = SecurityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha-256" | "sha256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            _ => Err(SecurityError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// A salted digest of a single value.
///
/// Verification recomputes the digest with the stored salt and compares for
/// exact equality; there is no shortcut that bypasses recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRecord {
    pub digest: String,
    pub salt: String,
    pub algorithm: HashAlgorithm,
}

/// Hash a value with the selected algorithm and an optional hex-encoded salt.
///
/// When the salt is omitted, 32 fresh random bytes are generated and
/// hex-encoded. The digest input is the concatenated string forms
/// `value + salt`.
pub fn hash_value(
    value: &str,
    algorithm: HashAlgorithm,
    salt: Option<String>,
) -> Result<HashRecord, SecurityError> {
    let salt = match salt {
        Some(s) => s,
        None => {
            let mut raw = [0u8; HASH_SALT_LEN];
            secure_random(&mut raw)?;
            hex::encode(raw)
        }
    };

    let digest = digest_hex(value, &salt, algorithm);
    Ok(HashRecord {
        digest,
        salt,
        algorithm,
    })
}

/// Verify a value against a stored hash record.
pub fn verify_hash(value: &str, record: &HashRecord) -> bool {
    digest_hex(value, &record.salt, record.algorithm) == record.digest
}

/// Deterministic unsalted SHA-256 of an identifier, hex encoded.
///
/// Used as the pseudonymous storage key; one-way, not secret.
pub fn sha256_hex(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

fn digest_hex(value: &str, salt: &str, algorithm: HashAlgorithm) -> String {
    let mut input = String::with_capacity(value.len() + salt.len());
    input.push_str(value);
    input.push_str(salt);

    match algorithm {
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
        HashAlgorithm::Blake3 => blake3::hash(input.as_bytes()).to_hex().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_and_salt_verify() {
        let record = hash_value("auth_token_xyz", HashAlgorithm::Sha256, None).unwrap();
        assert!(verify_hash("auth_token_xyz", &record));
    }

    #[test]
    fn changed_value_fails_verification() {
        let record = hash_value("auth_token_xyz", HashAlgorithm::Blake3, None).unwrap();
        assert!(!verify_hash("auth_token_abc", &record));
    }

    #[test]
    fn explicit_salt_is_deterministic() {
        let salt = "00".repeat(HASH_SALT_LEN);
        let a = hash_value("v", HashAlgorithm::Blake3, Some(salt.clone())).unwrap();
        let b = hash_value("v", HashAlgorithm::Blake3, Some(salt)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn omitted_salt_is_random() {
        let a = hash_value("v", HashAlgorithm::Sha256, None).unwrap();
        let b = hash_value("v", HashAlgorithm::Sha256, None).unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn algorithms_disagree_on_same_input() {
        let salt = "ab".repeat(HASH_SALT_LEN);
        let sha = hash_value("v", HashAlgorithm::Sha256, Some(salt.clone())).unwrap();
        let b3 = hash_value("v", HashAlgorithm::Blake3, Some(salt)).unwrap();
        assert_ne!(sha.digest, b3.digest);
    }

    #[test]
    fn unknown_algorithm_name_is_rejected() {
        let err = "MD5".parse::<HashAlgorithm>().unwrap_err();
        assert!(matches!(err, SecurityError::UnsupportedAlgorithm(_)));
    }

    #[test]
    fn sha256_hex_is_stable() {
        assert_eq!(sha256_hex("player_one"), sha256_hex("player_one"));
        assert_ne!(sha256_hex("player_one"), sha256_hex("player_two"));
    }

    #[test]
    fn hash_record_serde_roundtrip() {
        let record = hash_value("v", HashAlgorithm::Blake3, None).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("BLAKE3"));

        let parsed: HashRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert!(verify_hash("v", &parsed));
    }
}
