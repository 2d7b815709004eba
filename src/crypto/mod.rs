//! Cryptographic primitives for game-data protection.
//!
//! Provides key derivation, authenticated encryption, salted hashing, and the
//! envelope structure that bundles an encryption's output.

pub mod aead;
pub mod envelope;
pub mod hashing;
pub mod kdf;

pub use envelope::EncryptedEnvelope;
pub use hashing::{HashAlgorithm, HashRecord, hash_value, verify_hash};
pub use kdf::{derive_key, generate_salt};

use crate::error::SecurityError;
use getrandom::fill;

/// Length of the KDF salt (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the AES-GCM nonce (12 bytes / 96 bits).
pub const NONCE_LEN: usize = 12;
/// Length of the GCM authentication tag (16 bytes / 128 bits).
pub const TAG_LEN: usize = 16;
/// Length of the encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of a hashing salt before hex encoding (32 bytes).
pub const HASH_SALT_LEN: usize = 32;
/// Algorithm identifier written into every envelope.
pub const AES_256_GCM: &str = "AES-256-GCM";

/// Fill buffer with cryptographically secure random bytes
pub(crate) fn secure_random(buf: &mut [u8]) -> Result<(), SecurityError> {
    fill(buf).map_err(|_| SecurityError::Encryption("OS random generator unavailable".into()))
}
