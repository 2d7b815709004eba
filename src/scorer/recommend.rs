//! Threshold-driven recommendation rules.
//!
//! A fixed table: each rule appends at most one recommendation, keyed on a
//! category score threshold plus specific answer values. Rules are mutually
//! exclusive by construction, so no dedup pass is needed.

use serde::{Deserialize, Serialize};

use super::{CategoryScores, QuestionnaireResponse};
use crate::scorer::rubric::{
    Answer, DataCollectionAwareness, PasswordPractices, PersonalInfoSharing, PrivacySettingsCheck,
    Streaming, ThirdPartyConnections, TwoFactorAuth, VoiceChat,
};

/// Ordered by urgency; the derived ordering drives the final sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub priority: Priority,
    pub description: String,
    pub steps: Vec<String>,
}

fn rule(title: &str, priority: Priority, description: &str, steps: &[&str]) -> Recommendation {
    Recommendation {
        title: title.to_string(),
        priority,
        description: description.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
    }
}

/// Generate personalized recommendations from an assessment.
///
/// Returns High priority entries first, then Medium, then Low, preserving
/// rule-table order within each priority.
pub fn recommend(
    responses: &QuestionnaireResponse,
    categories: &CategoryScores,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if categories.account_security >= 60.0 {
        if matches!(
            TwoFactorAuth::parse(&responses.two_factor_auth),
            Some(TwoFactorAuth::Never | TwoFactorAuth::FewAccounts)
        ) {
            recommendations.push(rule(
                "Enable Two-Factor Authentication",
                Priority::High,
                "Add an extra layer of security to your gaming accounts with 2FA",
                &[
                    "Log into your gaming platform accounts",
                    "Go to Security or Account Settings",
                    "Enable Two-Factor Authentication",
                    "Use an authenticator app for better security",
                    "Save backup codes in a secure location",
                ],
            ));
        }

        if matches!(
            PasswordPractices::parse(&responses.password_practices),
            Some(PasswordPractices::Similar | PasswordPractices::SameEverywhere)
        ) {
            recommendations.push(rule(
                "Improve Password Security",
                Priority::High,
                "Use unique, strong passwords for each gaming account",
                &[
                    "Install a reputable password manager",
                    "Generate unique passwords for each account",
                    "Use passwords with 12+ characters",
                    "Include numbers, symbols, and mixed case",
                    "Change passwords if they've been reused",
                ],
            ));
        }
    }

    if categories.privacy_awareness >= 50.0 {
        if matches!(
            PrivacySettingsCheck::parse(&responses.privacy_settings_check),
            Some(PrivacySettingsCheck::Rarely | PrivacySettingsCheck::Never)
        ) {
            recommendations.push(rule(
                "Review Privacy Settings Regularly",
                Priority::Medium,
                "Stay on top of your privacy settings across all gaming platforms",
                &[
                    "Set a monthly reminder to check privacy settings",
                    "Review settings after platform updates",
                    "Check what data is being collected",
                    "Adjust sharing and visibility preferences",
                    "Document your preferred settings",
                ],
            ));
        }

        if matches!(
            DataCollectionAwareness::parse(&responses.data_collection_awareness),
            Some(DataCollectionAwareness::NotVeryAware | DataCollectionAwareness::NotAwareAtAll)
        ) {
            recommendations.push(rule(
                "Learn About Data Collection",
                Priority::Medium,
                "Understand what data games collect and how it's used",
                &[
                    "Read privacy policies of your favorite games",
                    "Use privacy transparency tools",
                    "Learn about different types of data collection",
                    "Understand your data rights",
                    "Complete privacy education modules",
                ],
            ));
        }
    }

    if categories.data_sharing_control >= 50.0 {
        if matches!(
            PersonalInfoSharing::parse(&responses.personal_info_sharing),
            Some(PersonalInfoSharing::Sometimes | PersonalInfoSharing::Frequently)
        ) {
            recommendations.push(rule(
                "Limit Personal Information Sharing",
                Priority::High,
                "Be more cautious about sharing personal details in games",
                &[
                    "Avoid sharing real name, age, or location",
                    "Use gaming-specific usernames",
                    "Be cautious in voice and text chat",
                    "Don't share social media profiles",
                    "Educate yourself about social engineering",
                ],
            ));
        }

        if matches!(
            ThirdPartyConnections::parse(&responses.third_party_connections),
            Some(ThirdPartyConnections::Sometimes | ThirdPartyConnections::Frequently)
        ) {
            recommendations.push(rule(
                "Audit Social Media Connections",
                Priority::Medium,
                "Review and limit connections between gaming and social accounts",
                &[
                    "Review connected social media accounts",
                    "Disconnect unnecessary integrations",
                    "Control what gaming activity is shared",
                    "Adjust auto-posting settings",
                    "Review friend sync settings",
                ],
            ));
        }
    }

    if categories.gaming_habits >= 60.0 {
        if matches!(
            VoiceChat::parse(&responses.voice_chat),
            Some(VoiceChat::StrangersFrequently)
        ) {
            recommendations.push(rule(
                "Secure Voice Chat Practices",
                Priority::Medium,
                "Protect your privacy during voice communications",
                &[
                    "Use push-to-talk instead of open mic",
                    "Be cautious about background noise revealing location",
                    "Don't share personal information in voice chat",
                    "Use voice changers if desired for anonymity",
                    "Report inappropriate behavior",
                ],
            ));
        }

        if matches!(
            Streaming::parse(&responses.streaming),
            Some(Streaming::Regularly | Streaming::Professionally)
        ) {
            recommendations.push(rule(
                "Streaming Privacy Protection",
                Priority::Medium,
                "Protect your privacy while streaming gameplay",
                &[
                    "Use streaming-specific privacy settings",
                    "Hide personal information from screen",
                    "Be careful about showing emails or messages",
                    "Use separate accounts for streaming",
                    "Control chat and interaction settings",
                ],
            ));
        }
    }

    // stable sort keeps table order within equal priority
    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::assess;

    fn risky_responses() -> QuestionnaireResponse {
        QuestionnaireResponse {
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
        }
    }

    fn careful_responses() -> QuestionnaireResponse {
        QuestionnaireResponse {
            gaming_frequency: "Rarely".into(),
            multiplayer_gaming: "Never".into(),
            voice_chat: "Never".into(),
            streaming: "Never".into(),
            account_sharing: "Never".into(),
            password_practices: "Unique strong passwords".into(),
            two_factor_auth: "On all accounts".into(),
            privacy_settings_check: "Regularly".into(),
            data_collection_awareness: "Very aware".into(),
            permission_review: "Always".into(),
            personal_info_sharing: "Never".into(),
            third_party_connections: "Never".into(),
        }
    }

    #[test]
    fn risky_profile_triggers_all_rules() {
        let responses = risky_responses();
        let assessment = assess(&responses).unwrap();
        let recs = recommend(&responses, &assessment.categories);

        assert_eq!(recs.len(), 8);
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert!(titles.contains(&"Enable Two-Factor Authentication"));
        assert!(titles.contains(&"Streaming Privacy Protection"));
    }

    #[test]
    fn careful_profile_triggers_nothing() {
        let responses = careful_responses();
        let assessment = assess(&responses).unwrap();
        assert!(recommend(&responses, &assessment.categories).is_empty());
    }

    #[test]
    fn priorities_are_ordered_high_to_low() {
        let responses = risky_responses();
        let assessment = assess(&responses).unwrap();
        let recs = recommend(&responses, &assessment.categories);

        let priorities: Vec<Priority> = recs.iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
        assert_eq!(recs[0].priority, Priority::High);
    }

    #[test]
    fn table_order_is_preserved_within_priority() {
        let responses = risky_responses();
        let assessment = assess(&responses).unwrap();
        let recs = recommend(&responses, &assessment.categories);

        let high: Vec<&str> = recs
            .iter()
            .filter(|r| r.priority == Priority::High)
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(
            high,
            [
                "Enable Two-Factor Authentication",
                "Improve Password Security",
                "Limit Personal Information Sharing",
            ]
        );
    }

    #[test]
    fn threshold_gates_suppress_rules() {
        // bad 2FA answer, but overall account security below the 60 gate
        let mut responses = careful_responses();
        responses.two_factor_auth = "On few accounts".into();

        let assessment = assess(&responses).unwrap();
        assert!(assessment.categories.account_security < 60.0);
        assert!(recommend(&responses, &assessment.categories).is_empty());
    }
}
