//! Simulated per-user game-data snapshot and sensitive-field redaction.
//!
//! A production build would pull snapshots from platform APIs or cloud saves;
//! the generator here stands in for that collaborator.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::crypto::{HashAlgorithm, HashRecord, hashing, secure_random};
use crate::error::SecurityError;

/// Snapshot fields whose values must never leave the process in plaintext.
pub const SENSITIVE_FIELDS: [&str; 3] = ["auth_token", "session_key", "api_credentials"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub experience_points: u64,
    pub achievements_unlocked: u32,
    pub total_playtime_hours: f64,
    pub last_played: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub high_score: u64,
    pub average_score: u64,
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub difficulty: String,
    pub graphics_quality: String,
    pub audio_volume: f64,
    pub control_scheme: String,
    pub privacy_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveData {
    pub auth_token: String,
    pub session_key: String,
    pub api_credentials: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub retrieved_at: String,
    pub data_version: String,
    pub encryption_required: bool,
}

/// A per-user game-data snapshot as a platform integration would return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDataRecord {
    pub user_id: String,
    pub game_name: String,
    pub progress: Progress,
    pub scores: MatchStats,
    pub settings: GameSettings,
    pub sensitive: SensitiveData,
    pub metadata: Metadata,
}

/// The snapshot after redaction: sensitive values replaced by salted digests,
/// originals dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactedRecord {
    pub user_id: String,
    pub game_name: String,
    pub progress: Progress,
    pub scores: MatchStats,
    pub settings: GameSettings,
    pub sensitive_hashes: BTreeMap<String, HashRecord>,
    pub metadata: Metadata,
}

impl GameDataRecord {
    /// Top-level sections of a snapshot.
    pub const FIELD_COUNT: usize = 7;

    /// Build a simulated snapshot for a user and game.
    pub fn simulated(user_id: &str, game_name: &str) -> Result<Self, SecurityError> {
        let now = Utc::now().to_rfc3339();

        let mut session = [0u8; 16];
        secure_random(&mut session)?;

        Ok(Self {
            user_id: user_id.to_string(),
            game_name: game_name.to_string(),
            progress: Progress {
                level: 42,
                experience_points: 15_750,
                achievements_unlocked: 23,
                total_playtime_hours: 127.5,
                last_played: now.clone(),
            },
            scores: MatchStats {
                high_score: 89_500,
                average_score: 45_200,
                total_matches: 312,
                wins: 187,
                losses: 125,
            },
            settings: GameSettings {
                difficulty: "Hard".to_string(),
                graphics_quality: "Ultra".to_string(),
                audio_volume: 0.8,
                control_scheme: "Custom".to_string(),
                privacy_mode: true,
            },
            sensitive: SensitiveData {
                auth_token: format!("token_{user_id}_{game_name}"),
                session_key: format!("session_{}", hex::encode(session)),
                api_credentials: format!("cred_{user_id}"),
            },
            metadata: Metadata {
                retrieved_at: now,
                data_version: "1.0".to_string(),
                encryption_required: true,
            },
        })
    }

    /// Replace every sensitive value with a BLAKE3 hash record, dropping the
    /// originals.
    pub fn redact(&self) -> Result<RedactedRecord, SecurityError> {
        let mut sensitive_hashes = BTreeMap::new();
        for (name, value) in [
            ("auth_token", &self.sensitive.auth_token),
            ("session_key", &self.sensitive.session_key),
            ("api_credentials", &self.sensitive.api_credentials),
        ] {
            let record = hashing::hash_value(value, HashAlgorithm::Blake3, None)?;
            sensitive_hashes.insert(format!("{name}_hash"), record);
        }

        Ok(RedactedRecord {
            user_id: self.user_id.clone(),
            game_name: self.game_name.clone(),
            progress: self.progress.clone(),
            scores: self.scores.clone(),
            settings: self.settings.clone(),
            sensitive_hashes,
            metadata: self.metadata.clone(),
        })
    }
}
