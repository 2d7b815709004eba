use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};
use zeroize::Zeroizing;

use super::{KEY_LEN, NONCE_LEN, TAG_LEN, secure_random};
use crate::error::SecurityError;

/// Generate a fresh GCM nonce
pub fn generate_nonce() -> Result<[u8; NONCE_LEN], SecurityError> {
    let mut nonce = [0u8; NONCE_LEN];
    secure_random(&mut nonce)?;
    Ok(nonce)
}

/// Encrypt plaintext, returning detached ciphertext, nonce, and tag.
///
/// A fresh nonce is generated on every call; a repeated (key, nonce) pair
/// breaks GCM, so callers never supply their own.
pub fn encrypt(
    key: &[u8; KEY_LEN],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; NONCE_LEN], [u8; TAG_LEN]), SecurityError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let nonce = generate_nonce()?;

    let mut sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| SecurityError::Encryption("AES-GCM encryption failed".into()))?;

    // aes-gcm appends the tag; the envelope carries it as its own field
    let split = sealed
        .len()
        .checked_sub(TAG_LEN)
        .ok_or_else(|| SecurityError::Encryption("ciphertext shorter than GCM tag".into()))?;
    let tag: [u8; TAG_LEN] = sealed[split..]
        .try_into()
        .map_err(|_| SecurityError::Encryption("malformed GCM output".into()))?;
    sealed.truncate(split);

    Ok((sealed, nonce, tag))
}

/// Decrypt a detached ciphertext and tag.
///
/// Fails with `Authentication` when the tag does not verify; no partial or
/// garbled plaintext is ever returned.
pub fn decrypt(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<Zeroizing<Vec<u8>>, SecurityError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), sealed.as_slice())
        .map_err(|_| SecurityError::Authentication)?;
    Ok(Zeroizing::new(plaintext))
}
