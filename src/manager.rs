//! Secure login orchestration: envelope construction, pseudonymous ids, and
//! the structured success/failure report the UI layer consumes.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::{
    AES_256_GCM, EncryptedEnvelope, HashAlgorithm, KEY_LEN, SALT_LEN, aead, hashing, kdf,
};
use crate::error::SecurityError;
use crate::record::{GameDataRecord, RedactedRecord};

/// Games the simulated detector can report.
const DETECTABLE_GAMES: [&str; 8] = [
    "Valorant",
    "League of Legends",
    "Fortnite",
    "Minecraft",
    "Among Us",
    "Call of Duty",
    "Apex Legends",
    "Rocket League",
];

/// Derive a key, generating a fresh salt when none is supplied.
pub fn derive_key(
    password: &str,
    salt: Option<[u8; SALT_LEN]>,
) -> Result<(Zeroizing<[u8; KEY_LEN]>, [u8; SALT_LEN]), SecurityError> {
    let salt = match salt {
        Some(s) => s,
        None => kdf::generate_salt()?,
    };
    let key = kdf::derive_key(password, &salt)?;
    Ok((key, salt))
}

/// Encrypt a plaintext string under a password-derived key.
///
/// Salt and IV are fresh and independent for every call.
pub fn encrypt(plaintext: &str, password: &str) -> Result<EncryptedEnvelope, SecurityError> {
    let salt = kdf::generate_salt()?;
    let key = kdf::derive_key(password, &salt)?;
    let (ciphertext, iv, auth_tag) = aead::encrypt(&key, plaintext.as_bytes())?;

    Ok(EncryptedEnvelope {
        ciphertext,
        salt,
        iv,
        auth_tag,
        algorithm: AES_256_GCM.to_string(),
        created_at: Utc::now().to_rfc3339(),
    })
}

/// Decrypt an envelope with the password that produced it.
///
/// Re-derives the key from the stored salt. `Authentication` on tag failure,
/// `UnsupportedAlgorithm` if the envelope names an algorithm we do not speak.
pub fn decrypt(
    envelope: &EncryptedEnvelope,
    password: &str,
) -> Result<Zeroizing<String>, SecurityError> {
    envelope.check_algorithm()?;

    let key = kdf::derive_key(password, &envelope.salt)?;
    let bytes = aead::decrypt(&key, &envelope.iv, &envelope.ciphertext, &envelope.auth_tag)?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| SecurityError::Encryption("decrypted payload is not valid UTF-8".into()))?;
    Ok(Zeroizing::new(text.to_string()))
}

/// Integrity check: true when the envelope decrypts cleanly under `password`.
pub fn verify_envelope(envelope: &EncryptedEnvelope, password: &str) -> bool {
    decrypt(envelope, password).is_ok()
}

/// Deterministic pseudonymous identifier for a user, used as the storage key
/// so the identifier itself is never persisted in plaintext.
pub fn pseudonymous_id(user_id: &str) -> String {
    hashing::sha256_hex(user_id)
}

/// Simulated game detection.
///
/// A real deployment would ask platform APIs or watch processes; here the
/// pick is a stable function of the user id so repeated logins agree.
pub fn detect_game(user_id: &str) -> String {
    let digest = hashing::sha256_hex(user_id);
    let idx = digest
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_add(b as usize))
        % DETECTABLE_GAMES.len();
    DETECTABLE_GAMES[idx].to_string()
}

/// Short-lived password holder passed explicitly by the caller.
///
/// Replaces hidden instance-level session state; one context per login
/// session, not shared across threads.
pub struct SessionContext {
    password: Zeroizing<String>,
}

impl SessionContext {
    pub fn new(password: Zeroizing<String>) -> Self {
        Self { password }
    }

    /// Serialize and encrypt a redacted record.
    pub fn encrypt_record(&self, record: &RedactedRecord) -> Result<EncryptedEnvelope, SecurityError> {
        let json = serde_json::to_string(record)
            .map_err(|e| SecurityError::Encryption(format!("record serialization failed: {e}")))?;
        encrypt(&json, &self.password)
    }

    /// Decrypt and deserialize a redacted record.
    pub fn decrypt_record(&self, envelope: &EncryptedEnvelope) -> Result<RedactedRecord, SecurityError> {
        let json = decrypt(envelope, &self.password)?;
        serde_json::from_str(&json)
            .map_err(|e| SecurityError::Encryption(format!("record deserialization failed: {e}")))
    }
}

/// What the login flow applied, for display and storage alongside the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySummary {
    pub encryption_algorithm: String,
    pub hash_algorithms: Vec<String>,
    pub key_strength: String,
    pub key_derivation: String,
    pub total_fields: usize,
    pub sensitive_fields_hashed: usize,
    pub encrypted_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginSuccess {
    pub user_id_hash: String,
    pub detected_game: String,
    pub envelope: EncryptedEnvelope,
    pub summary: SecuritySummary,
}

/// Structured result of the secure login flow.
///
/// This is the one call that converts taxonomy errors into a reportable
/// value instead of propagating them.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginReport {
    Success(Box<LoginSuccess>),
    Error { error_message: String, at: String },
}

impl LoginReport {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginReport::Success(_))
    }
}

/// Run the full secure login simulation for a user.
///
/// Detects the current game, builds a snapshot, hashes the sensitive fields,
/// encrypts the redacted record, and bundles the envelope with a pseudonymous
/// id and a security summary. Never panics and never propagates an error.
pub fn secure_login_flow(user_id: &str, password: &str) -> LoginReport {
    match login_inner(user_id, password) {
        Ok(success) => LoginReport::Success(Box::new(success)),
        Err(e) => LoginReport::Error {
            error_message: e.to_string(),
            at: Utc::now().to_rfc3339(),
        },
    }
}

fn login_inner(user_id: &str, password: &str) -> Result<LoginSuccess, SecurityError> {
    let game = detect_game(user_id);
    let snapshot = GameDataRecord::simulated(user_id, &game)?;
    let redacted = snapshot.redact()?;

    let session = SessionContext::new(Zeroizing::new(password.to_string()));
    let envelope = session.encrypt_record(&redacted)?;
    let encrypted_at = envelope.created_at.clone();

    Ok(LoginSuccess {
        user_id_hash: pseudonymous_id(user_id),
        detected_game: game,
        summary: SecuritySummary {
            encryption_algorithm: envelope.algorithm.clone(),
            hash_algorithms: vec![
                HashAlgorithm::Sha256.as_str().to_string(),
                HashAlgorithm::Blake3.as_str().to_string(),
            ],
            key_strength: "256-bit".to_string(),
            key_derivation: "PBKDF2-SHA256".to_string(),
            total_fields: GameDataRecord::FIELD_COUNT,
            sensitive_fields_hashed: redacted.sensitive_hashes.len(),
            encrypted_at,
        },
        envelope,
    })
}
