//! Privacy risk assessment.
//!
//! Pure, deterministic scoring: no I/O, no randomness, fully reproducible.

pub mod recommend;
pub mod rubric;

pub use recommend::{Priority, Recommendation, recommend};

use serde::{Deserialize, Serialize};

use crate::error::SecurityError;

/// The twelve questionnaire answers, as the literal option strings the form
/// presents. Unknown strings degrade to weight 0 when scored; blank or
/// missing answers are a validation failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireResponse {
    pub gaming_frequency: String,
    pub multiplayer_gaming: String,
    pub voice_chat: String,
    pub streaming: String,
    pub account_sharing: String,
    pub password_practices: String,
    pub two_factor_auth: String,
    pub privacy_settings_check: String,
    pub data_collection_awareness: String,
    pub permission_review: String,
    pub third_party_connections: String,
    pub personal_info_sharing: String,
}

impl QuestionnaireResponse {
    fn fields(&self) -> [(&'static str, &str); 12] {
        [
            ("gaming_frequency", &self.gaming_frequency),
            ("multiplayer_gaming", &self.multiplayer_gaming),
            ("voice_chat", &self.voice_chat),
            ("streaming", &self.streaming),
            ("account_sharing", &self.account_sharing),
            ("password_practices", &self.password_practices),
            ("two_factor_auth", &self.two_factor_auth),
            ("privacy_settings_check", &self.privacy_settings_check),
            (
                "data_collection_awareness",
                &self.data_collection_awareness,
            ),
            ("permission_review", &self.permission_review),
            ("third_party_connections", &self.third_party_connections),
            ("personal_info_sharing", &self.personal_info_sharing),
        ]
    }

    /// Every answer must be present; option strings outside the vocabulary
    /// are allowed (they score 0), blanks are not.
    pub fn validate(&self) -> Result<(), SecurityError> {
        for (name, value) in self.fields() {
            if value.is_empty() {
                return Err(SecurityError::Validation(name.to_string()));
            }
        }
        Ok(())
    }
}

/// Per-category risk scores, each in [0, 100]. Serialized field names match
/// the assessment report labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    #[serde(rename = "Gaming Habits")]
    pub gaming_habits: f64,
    #[serde(rename = "Account Security")]
    pub account_security: f64,
    #[serde(rename = "Privacy Awareness")]
    pub privacy_awareness: f64,
    #[serde(rename = "Data Sharing Control")]
    pub data_sharing_control: f64,
}

/// Risk classification. High means high RISK; the dashboard privacy score in
/// [`privacy_score`] runs the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn from_overall(overall: u8) -> Self {
        if overall >= 70 {
            RiskLevel::High
        } else if overall >= 40 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub overall: u8,
    pub level: RiskLevel,
    pub categories: CategoryScores,
}

/// Score a completed questionnaire.
///
/// Overall = 0.2·GamingHabits + 0.25·AccountSecurity + 0.25·PrivacyAwareness
/// + 0.3·DataSharingControl, truncated to an integer, then classified at the
/// 70/40 thresholds.
pub fn assess(responses: &QuestionnaireResponse) -> Result<Assessment, SecurityError> {
    responses.validate()?;

    let categories = CategoryScores {
        gaming_habits: rubric::gaming_habits(responses),
        account_security: rubric::account_security(responses),
        privacy_awareness: rubric::privacy_awareness(responses),
        data_sharing_control: rubric::data_sharing_control(responses),
    };

    let overall_risk = categories.gaming_habits * 0.2
        + categories.account_security * 0.25
        + categories.privacy_awareness * 0.25
        + categories.data_sharing_control * 0.3;
    let overall = overall_risk as u8;

    Ok(Assessment {
        overall,
        level: RiskLevel::from_overall(overall),
        categories,
    })
}

/// Inputs to the dashboard privacy score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyProfile {
    pub two_factor_enabled: bool,
    pub unique_passwords: bool,
    pub privacy_settings_reviewed: bool,
    pub limited_data_sharing: bool,
}

/// Dashboard privacy score, higher is BETTER.
///
/// Computed by a different rubric than the risk score and inversely related
/// to it; the two numbers are intentionally independent and must not be
/// treated as the same quantity.
pub fn privacy_score(profile: &PrivacyProfile) -> u8 {
    let mut score: u32 = 65;

    if profile.two_factor_enabled {
        score += 10;
    }
    if profile.unique_passwords {
        score += 8;
    }
    if profile.privacy_settings_reviewed {
        score += 7;
    }
    if profile.limited_data_sharing {
        score += 10;
    }

    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The worked example: heavy gaming habits, everything else careful.
    fn example_responses() -> QuestionnaireResponse {
        QuestionnaireResponse {
            gaming_frequency: "Daily".into(),
            multiplayer_gaming: "Always".into(),
            voice_chat: "Frequently with strangers".into(),
            streaming: "Never".into(),
            account_sharing: "Never".into(),
            personal_info_sharing: "Never".into(),
            password_practices: "Unique strong passwords".into(),
            two_factor_auth: "On all accounts".into(),
            privacy_settings_check: "Regularly".into(),
            data_collection_awareness: "Very aware".into(),
            permission_review: "Always".into(),
            third_party_connections: "Never".into(),
        }
    }

    #[test]
    fn example_scenario_scores_twelve_low() {
        let assessment = assess(&example_responses()).unwrap();

        assert_eq!(assessment.categories.gaming_habits, 63.0);
        assert_eq!(assessment.categories.account_security, 0.0);
        assert_eq!(assessment.categories.privacy_awareness, 0.0);
        assert_eq!(assessment.categories.data_sharing_control, 0.0);
        assert_eq!(assessment.overall, 12);
        assert_eq!(assessment.level, RiskLevel::Low);
    }

    #[test]
    fn assessment_is_deterministic() {
        let responses = example_responses();
        assert_eq!(assess(&responses).unwrap(), assess(&responses).unwrap());
    }

    #[test]
    fn scores_stay_in_bounds_for_worst_case() {
        let responses = QuestionnaireResponse {
            gaming_frequency: "Multiple times daily".into(),
            multiplayer_gaming: "Always".into(),
            voice_chat: "Frequently with strangers".into(),
            streaming: "Professionally".into(),
            account_sharing: "With strangers".into(),
            password_practices: "Same password everywhere".into(),
            two_factor_auth: "Never".into(),
            privacy_settings_check: "Never".into(),
            data_collection_awareness: "Not aware at all".into(),
            permission_review: "Never".into(),
            personal_info_sharing: "Frequently".into(),
            third_party_connections: "Frequently".into(),
        };

        let assessment = assess(&responses).unwrap();
        assert!(assessment.overall <= 100);
        assert_eq!(assessment.level, RiskLevel::High);
        for score in [
            assessment.categories.gaming_habits,
            assessment.categories.account_security,
            assessment.categories.privacy_awareness,
            assessment.categories.data_sharing_control,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn unrecognized_answers_degrade_to_zero_weight() {
        let mut responses = example_responses();
        responses.gaming_frequency = "Only on Tuesdays".into();

        let assessment = assess(&responses).unwrap();
        // frequency contributes nothing; the other gaming answers still count
        assert_eq!(assessment.categories.gaming_habits, 48.0);
    }

    #[test]
    fn blank_answer_is_a_validation_error() {
        let mut responses = example_responses();
        responses.two_factor_auth = String::new();

        let err = assess(&responses).unwrap_err();
        match err {
            SecurityError::Validation(field) => assert_eq!(field, "two_factor_auth"),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn risk_levels_split_at_the_documented_thresholds() {
        assert_eq!(RiskLevel::from_overall(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_overall(39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_overall(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_overall(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_overall(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_overall(100), RiskLevel::High);
    }

    #[test]
    fn category_labels_survive_serialization() {
        let assessment = assess(&example_responses()).unwrap();
        let json = serde_json::to_string(&assessment).unwrap();
        assert!(json.contains("Gaming Habits"));
        assert!(json.contains("Data Sharing Control"));
    }

    #[test]
    fn privacy_score_rewards_good_habits() {
        assert_eq!(privacy_score(&PrivacyProfile::default()), 65);
        assert_eq!(
            privacy_score(&PrivacyProfile {
                two_factor_enabled: true,
                unique_passwords: true,
                privacy_settings_reviewed: true,
                limited_data_sharing: true,
            }),
            100
        );
        assert_eq!(
            privacy_score(&PrivacyProfile {
                two_factor_enabled: true,
                ..Default::default()
            }),
            75
        );
    }
}
