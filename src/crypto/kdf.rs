use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::{KEY_LEN, SALT_LEN, secure_random};
use crate::error::SecurityError;

/// PBKDF2 iteration count, fixed for every envelope this crate produces.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Generate a fresh KDF salt
pub fn generate_salt() -> Result<[u8; SALT_LEN], SecurityError> {
    let mut salt = [0u8; SALT_LEN];
    secure_random(&mut salt)
        .map_err(|_| SecurityError::KeyDerivation("OS random generator unavailable".into()))?;
    Ok(salt)
}

/// Derive a 256-bit encryption key from a password and salt.
///
/// Deterministic for a given `(password, salt)` pair; this is the contract
/// that makes decryption of a stored envelope possible.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>, SecurityError> {
    if password.is_empty() {
        return Err(SecurityError::KeyDerivation(
            "password must not be empty".into(),
        ));
    }
    if salt.len() != SALT_LEN {
        return Err(SecurityError::KeyDerivation(format!(
            "salt must be {SALT_LEN} bytes, got {}",
            salt.len()
        )));
    }

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *key);
    Ok(key)
}
