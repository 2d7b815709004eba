use serde::{Deserialize, Serialize};

use super::{AES_256_GCM, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::error::SecurityError;

/// The bundled output of one authenticated-encryption operation.
///
/// `salt` and `iv` are freshly and independently random for every envelope.
/// Decryption with the original password yields the exact plaintext or fails
/// tag verification; there is no in-between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    #[serde(with = "hex::serde")]
    pub ciphertext: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub salt: [u8; SALT_LEN],
    #[serde(with = "hex::serde")]
    pub iv: [u8; NONCE_LEN],
    #[serde(with = "hex::serde")]
    pub auth_tag: [u8; TAG_LEN],
    pub algorithm: String,
    pub created_at: String,
}

impl EncryptedEnvelope {
    /// Errors unless the envelope was produced by the one algorithm this
    /// crate speaks.
    pub fn check_algorithm(&self) -> Result<(), SecurityError> {
        if self.algorithm != AES_256_GCM {
            return Err(SecurityError::UnsupportedAlgorithm(self.algorithm.clone()));
        }
        Ok(())
    }
}
