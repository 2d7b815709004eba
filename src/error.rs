use std::fmt;
use std::path::PathBuf;

/// Failure kinds of the security core.
///
/// Every cryptographic failure surfaces as a distinct variant; none is ever
/// collapsed into a boolean on a security-relevant path.
#[derive(Debug)]
pub enum SecurityError {
    /// Malformed password or salt handed to key derivation.
    KeyDerivation(String),
    /// Underlying cipher failure during encryption, or a payload that cannot
    /// be reconstructed after an otherwise successful decryption.
    Encryption(String),
    /// GCM tag mismatch on decrypt. Wrong password and tampered data are
    /// indistinguishable here; the tag check conflates both.
    Authentication,
    /// An envelope or hash record names an algorithm this crate does not speak.
    UnsupportedAlgorithm(String),
    /// A required questionnaire answer is missing or blank.
    Validation(String),
}

impl fmt::Display for SecurityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityError::KeyDerivation(msg) => write!(f, "key derivation failed: {msg}"),
            SecurityError::Encryption(msg) => write!(f, "encryption failed: {msg}"),
            SecurityError::Authentication => write!(f, "wrong password or tampered data"),
            SecurityError::UnsupportedAlgorithm(id) => write!(f, "unsupported algorithm '{id}'"),
            SecurityError::Validation(field) => {
                write!(f, "missing required questionnaire field '{field}'")
            }
        }
    }
}

impl std::error::Error for SecurityError {}

/// Failure kinds of the persistence collaborator.
///
/// "Not found", "corrupted", and "i/o failure" stay distinguishable so callers
/// can branch on them.
#[derive(Debug)]
pub enum VaultError {
    NotFound { kind: &'static str, id: String },
    Corrupted { path: PathBuf, reason: String },
    Io(std::io::Error),
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::NotFound { kind, id } => write!(f, "{kind} '{id}' not found"),
            VaultError::Corrupted { path, reason } => {
                write!(f, "vault file '{}' is corrupted: {reason}", path.display())
            }
            VaultError::Io(e) => write!(f, "vault i/o error: {e}"),
        }
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VaultError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VaultError {
    fn from(e: std::io::Error) -> Self {
        VaultError::Io(e)
    }
}
