//! File-backed persistence collaborator.
//!
//! Stores user profiles, encrypted envelopes, assessment history, and an
//! audit log under a vault directory. Only post-encryption envelopes and
//! digests ever reach this layer; plaintext records and passwords do not.
//!
//! Writes are crash-safe: data goes to a randomly named temporary file,
//! is fsynced, then atomically renamed over the target. If a crash occurs
//! mid-save, either the old or the new file is present, never a partial one.

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::crypto::EncryptedEnvelope;
use crate::error::VaultError;
use crate::manager::SecuritySummary;
use crate::scorer::{Assessment, Recommendation};

/// A user profile keyed by pseudonymous identifier. The real identifier is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub pseudonym: String,
    pub created_at: String,
    pub last_login: String,
}

/// An envelope at rest, with the metadata the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEnvelope {
    pub resource: String,
    pub envelope: EncryptedEnvelope,
    pub summary: SecuritySummary,
    pub content_digest: String,
    pub stored_at: String,
}

/// One line of the security audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: String,
    pub pseudonym: String,
    pub action: String,
    pub details: String,
}

impl AuditEntry {
    pub fn now(pseudonym: &str, action: &str, details: &str) -> Self {
        Self {
            at: Utc::now().to_rfc3339(),
            pseudonym: pseudonym.to_string(),
            action: action.to_string(),
            details: details.to_string(),
        }
    }
}

/// A completed assessment with its recommendations, kept as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub at: String,
    pub assessment: Assessment,
    pub recommendations: Vec<Recommendation>,
}

/// Aggregate counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultStats {
    pub users: usize,
    pub envelopes: usize,
    pub assessments: usize,
    pub audit_entries: usize,
}

#[derive(Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the profile, or refresh `last_login` if it already exists.
    pub fn upsert_user(&self, pseudonym: &str) -> Result<UserProfile, VaultError> {
        let now = Utc::now().to_rfc3339();
        let profile = match self.lookup_user(pseudonym) {
            Ok(mut existing) => {
                existing.last_login = now;
                existing
            }
            Err(VaultError::NotFound { .. }) => UserProfile {
                pseudonym: pseudonym.to_string(),
                created_at: now.clone(),
                last_login: now,
            },
            Err(e) => return Err(e),
        };

        self.write_json(&self.user_path(pseudonym), &profile)?;
        Ok(profile)
    }

    pub fn lookup_user(&self, pseudonym: &str) -> Result<UserProfile, VaultError> {
        self.read_json(&self.user_path(pseudonym), "user", pseudonym)
    }

    pub fn store_envelope(
        &self,
        pseudonym: &str,
        stored: &StoredEnvelope,
    ) -> Result<(), VaultError> {
        self.write_json(&self.envelope_path(pseudonym, &stored.resource), stored)
    }

    pub fn retrieve_envelope(
        &self,
        pseudonym: &str,
        resource: &str,
    ) -> Result<StoredEnvelope, VaultError> {
        self.read_json(&self.envelope_path(pseudonym, resource), "envelope", resource)
    }

    /// Append an assessment to the user's history.
    pub fn record_assessment(
        &self,
        pseudonym: &str,
        record: AssessmentRecord,
    ) -> Result<(), VaultError> {
        let mut history = self.assessment_history(pseudonym)?;
        history.push(record);
        self.write_json(&self.assessments_path(pseudonym), &history)
    }

    /// Assessment history, newest last. Empty for a user with no assessments.
    pub fn assessment_history(
        &self,
        pseudonym: &str,
    ) -> Result<Vec<AssessmentRecord>, VaultError> {
        match self.read_json(&self.assessments_path(pseudonym), "assessments", pseudonym) {
            Ok(history) => Ok(history),
            Err(VaultError::NotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Append one JSON line to the audit log.
    pub fn append_audit(&self, entry: &AuditEntry) -> Result<(), VaultError> {
        fs::create_dir_all(&self.root)?;

        let line = serde_json::to_string(entry).map_err(|e| VaultError::Corrupted {
            path: self.audit_path(),
            reason: e.to_string(),
        })?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.audit_path())?;
        writeln!(file, "{line}")?;
        file.sync_all()?;
        Ok(())
    }

    pub fn audit_entries(&self) -> Result<Vec<AuditEntry>, VaultError> {
        let file = match File::open(self.audit_path()) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(VaultError::Io(e)),
        };

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| VaultError::Corrupted {
                path: self.audit_path(),
                reason: e.to_string(),
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    pub fn stats(&self) -> Result<VaultStats, VaultError> {
        let users = count_files(&self.root.join("users"))?;

        let mut envelopes = 0;
        let mut assessments = 0;
        for dir in list_dirs(&self.root.join("envelopes"))? {
            envelopes += count_files(&dir)?;
        }
        for path in list_files(&self.root.join("assessments"))? {
            let history: Vec<AssessmentRecord> =
                self.read_json(&path, "assessments", &path.display().to_string())?;
            assessments += history.len();
        }

        Ok(VaultStats {
            users,
            envelopes,
            assessments,
            audit_entries: self.audit_entries()?.len(),
        })
    }

    fn user_path(&self, pseudonym: &str) -> PathBuf {
        self.root.join("users").join(format!("{pseudonym}.json"))
    }

    fn envelope_path(&self, pseudonym: &str, resource: &str) -> PathBuf {
        self.root
            .join("envelopes")
            .join(pseudonym)
            .join(format!("{}.json", sanitize(resource)))
    }

    fn assessments_path(&self, pseudonym: &str) -> PathBuf {
        self.root
            .join("assessments")
            .join(format!("{pseudonym}.json"))
    }

    fn audit_path(&self) -> PathBuf {
        self.root.join("audit.log")
    }

    fn read_json<T: DeserializeOwned>(
        &self,
        path: &Path,
        kind: &'static str,
        id: &str,
    ) -> Result<T, VaultError> {
        let data = match fs::read(path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(VaultError::NotFound {
                    kind,
                    id: id.to_string(),
                });
            }
            Err(e) => return Err(VaultError::Io(e)),
        };

        serde_json::from_slice(&data).map_err(|e| VaultError::Corrupted {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), VaultError> {
        let data = serde_json::to_vec_pretty(value).map_err(|e| VaultError::Corrupted {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        atomic_write(path, &data)
    }
}

fn sanitize(resource: &str) -> String {
    resource
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            other => other,
        })
        .collect()
}

fn count_files(dir: &Path) -> Result<usize, VaultError> {
    Ok(list_files(dir)?.len())
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>, VaultError> {
    list_entries(dir, false)
}

fn list_dirs(dir: &Path) -> Result<Vec<PathBuf>, VaultError> {
    list_entries(dir, true)
}

fn list_entries(dir: &Path, want_dirs: bool) -> Result<Vec<PathBuf>, VaultError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(VaultError::Io(e)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() == want_dirs {
            paths.push(entry.path());
        }
    }
    Ok(paths)
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), VaultError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = random_tmp_path(path)?;

    // securely create temp file (fail if exists)
    let mut tmp_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)?;

    tmp_file.write_all(data)?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    if let Err(e) = atomic_replace(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    // fsync directory so the rename itself is persisted
    if let Some(parent) = path.parent() {
        let dir = File::open(parent)?;
        dir.sync_all()?;
    }

    Ok(())
}

/// Unique temporary path in the target's directory: `name.tmp.<randomhex>`.
fn random_tmp_path(path: &Path) -> Result<PathBuf, VaultError> {
    let mut buf = [0u8; 8]; // 64 bit entropy
    getrandom::fill(&mut buf)
        .map_err(|_| VaultError::Io(io::Error::other("OS random generator unavailable")))?;

    let rand_string = hex::encode(buf);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vault".to_string());

    Ok(path.with_file_name(format!("{file_name}.tmp.{rand_string}")))
}

/// Atomically replaces the target file with the temporary file.
///
/// Uses Windows `ReplaceFileW` with `REPLACEFILE_WRITE_THROUGH` so the swap
/// is atomic and persisted.
#[cfg(target_os = "windows")]
fn atomic_replace(tmp_path: &Path, path: &Path) -> Result<(), VaultError> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::{REPLACEFILE_WRITE_THROUGH, ReplaceFileW};

    fn to_wide(s: &OsStr) -> Vec<u16> {
        s.encode_wide().chain(std::iter::once(0)).collect()
    }

    // ReplaceFileW fails if the target does not exist yet
    if !path.exists() {
        fs::rename(tmp_path, path)?;
        return Ok(());
    }

    let target_w = to_wide(path.as_os_str());
    let tmp_w = to_wide(tmp_path.as_os_str());

    // SAFETY:
    // - Strings are valid UTF-16 and null-terminated
    // - Pointers remain valid during the call
    // - Windows does not retain the pointers after return
    let result = unsafe {
        ReplaceFileW(
            target_w.as_ptr(),
            tmp_w.as_ptr(),
            std::ptr::null(),
            REPLACEFILE_WRITE_THROUGH,
            std::ptr::null(),
            std::ptr::null(),
        )
    };

    if result == 0 {
        return Err(VaultError::Io(io::Error::last_os_error()));
    }

    Ok(())
}

/// Atomically replaces the target file with the temporary file.
///
/// On Unix, `rename()` is atomic when both paths share a filesystem.
#[cfg(not(target_os = "windows"))]
fn atomic_replace(tmp_path: &Path, path: &Path) -> Result<(), VaultError> {
    fs::rename(tmp_path, path)?;
    Ok(())
}
