pub mod crypto;
pub mod error;
pub mod manager;
pub mod record;
pub mod scorer;
pub mod vault;

pub use crate::crypto::{EncryptedEnvelope, HashAlgorithm, HashRecord};
pub use crate::error::{SecurityError, VaultError};
pub use crate::manager::{LoginReport, SessionContext, secure_login_flow};
pub use crate::scorer::{
    Assessment, PrivacyProfile, QuestionnaireResponse, Recommendation, RiskLevel,
};
pub use crate::vault::{Vault, VaultStats};

use anyhow::{Context, Result};
use chrono::Utc;
use directories::ProjectDirs;
use zeroize::Zeroizing;

use crate::crypto::hashing;
use crate::record::RedactedRecord;
use crate::vault::{AssessmentRecord, AuditEntry, StoredEnvelope};

/// Ties the security core to the persistence collaborator: runs the flows,
/// stores their encrypted outputs, and appends audit entries.
pub struct GamerShield {
    vault: Vault,
}

impl GamerShield {
    pub fn open(vault: Vault) -> Self {
        Self { vault }
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Run the secure login simulation and persist the outcome.
    ///
    /// Success stores the envelope under the user's pseudonym keyed by the
    /// detected game; both outcomes land in the audit log.
    pub fn login(&self, user_id: &str, password: Zeroizing<String>) -> Result<LoginReport> {
        let report = manager::secure_login_flow(user_id, &password);

        match &report {
            LoginReport::Success(success) => {
                self.vault
                    .upsert_user(&success.user_id_hash)
                    .context("failed to record user profile")?;

                let stored = StoredEnvelope {
                    resource: success.detected_game.clone(),
                    content_digest: hashing::sha256_hex(&hex::encode(
                        &success.envelope.ciphertext,
                    )),
                    stored_at: Utc::now().to_rfc3339(),
                    summary: success.summary.clone(),
                    envelope: success.envelope.clone(),
                };
                self.vault
                    .store_envelope(&success.user_id_hash, &stored)
                    .context("failed to store encrypted envelope")?;

                self.vault.append_audit(&AuditEntry::now(
                    &success.user_id_hash,
                    "secure_login",
                    &format!("encrypted snapshot for '{}'", success.detected_game),
                ))?;
            }
            LoginReport::Error { error_message, .. } => {
                self.vault.append_audit(&AuditEntry::now(
                    &manager::pseudonymous_id(user_id),
                    "login_failed",
                    error_message,
                ))?;
            }
        }

        Ok(report)
    }

    /// Retrieve and decrypt the user's stored snapshot.
    pub fn unlock(&self, user_id: &str, password: Zeroizing<String>) -> Result<RedactedRecord> {
        let pseudonym = manager::pseudonymous_id(user_id);
        let game = manager::detect_game(user_id);

        let stored = self.vault.retrieve_envelope(&pseudonym, &game)?;
        let session = SessionContext::new(password);
        let record = session.decrypt_record(&stored.envelope)?;

        self.vault.append_audit(&AuditEntry::now(
            &pseudonym,
            "data_decrypted",
            &format!("decrypted snapshot for '{game}'"),
        ))?;

        Ok(record)
    }

    /// Score a questionnaire and generate recommendations, optionally
    /// persisting the result against a user.
    pub fn assess(
        &self,
        user_id: Option<&str>,
        responses: &QuestionnaireResponse,
    ) -> Result<(Assessment, Vec<Recommendation>)> {
        let assessment = scorer::assess(responses)?;
        let recommendations = scorer::recommend(responses, &assessment.categories);

        if let Some(user_id) = user_id {
            let pseudonym = manager::pseudonymous_id(user_id);
            self.vault.upsert_user(&pseudonym)?;
            self.vault.record_assessment(
                &pseudonym,
                AssessmentRecord {
                    at: Utc::now().to_rfc3339(),
                    assessment: assessment.clone(),
                    recommendations: recommendations.clone(),
                },
            )?;
            self.vault.append_audit(&AuditEntry::now(
                &pseudonym,
                "assessment_completed",
                &format!("risk {} ({})", assessment.overall, assessment.level),
            ))?;
        }

        Ok((assessment, recommendations))
    }

    pub fn stats(&self) -> Result<VaultStats> {
        Ok(self.vault.stats()?)
    }
}

/// Vault at the platform data directory.
pub fn default_vault() -> Result<Vault> {
    let project_dirs = ProjectDirs::from("", "", "gamershield")
        .context("could not determine platform directories")?;

    Ok(Vault::new(project_dirs.data_dir().join("vault")))
}
