//! Answer vocabularies and weight tables for the privacy assessment.
//!
//! Each question is a closed enum with a total weight mapping, so the rubric
//! cannot drift silently. Answers outside a vocabulary score the documented
//! fallback weight 0.

use super::QuestionnaireResponse;

pub(crate) trait Answer: Sized {
    fn parse(s: &str) -> Option<Self>;
    fn weight(self) -> f64;

    /// Weight of a raw answer string, falling back to 0 for anything outside
    /// the vocabulary.
    fn score(s: &str) -> f64 {
        Self::parse(s).map(Self::weight).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamingFrequency {
    Rarely,
    Weekly,
    Daily,
    MultipleTimesDaily,
}

impl Answer for GamingFrequency {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Rarely" => Some(Self::Rarely),
            "Weekly" => Some(Self::Weekly),
            "Daily" => Some(Self::Daily),
            "Multiple times daily" => Some(Self::MultipleTimesDaily),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Rarely => 10.0,
            Self::Weekly => 25.0,
            Self::Daily => 50.0,
            Self::MultipleTimesDaily => 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplayerGaming {
    Never,
    Occasionally,
    Frequently,
    Always,
}

impl Answer for MultiplayerGaming {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Never" => Some(Self::Never),
            "Occasionally" => Some(Self::Occasionally),
            "Frequently" => Some(Self::Frequently),
            "Always" => Some(Self::Always),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Never => 0.0,
            Self::Occasionally => 20.0,
            Self::Frequently => 50.0,
            Self::Always => 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceChat {
    Never,
    FriendsOnly,
    StrangersSometimes,
    StrangersFrequently,
}

impl Answer for VoiceChat {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Never" => Some(Self::Never),
            "With friends only" => Some(Self::FriendsOnly),
            "With strangers sometimes" => Some(Self::StrangersSometimes),
            "Frequently with strangers" => Some(Self::StrangersFrequently),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Never => 0.0,
            Self::FriendsOnly => 15.0,
            Self::StrangersSometimes => 45.0,
            Self::StrangersFrequently => 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Streaming {
    Never,
    Rarely,
    Regularly,
    Professionally,
}

impl Answer for Streaming {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Never" => Some(Self::Never),
            "Rarely" => Some(Self::Rarely),
            "Regularly" => Some(Self::Regularly),
            "Professionally" => Some(Self::Professionally),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Never => 0.0,
            Self::Rarely => 10.0,
            Self::Regularly => 40.0,
            Self::Professionally => 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSharing {
    Never,
    WithFamily,
    WithFriends,
    WithStrangers,
}

impl Answer for AccountSharing {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Never" => Some(Self::Never),
            "With family" => Some(Self::WithFamily),
            "With friends" => Some(Self::WithFriends),
            "With strangers" => Some(Self::WithStrangers),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Never => 0.0,
            Self::WithFamily => 20.0,
            Self::WithFriends => 50.0,
            Self::WithStrangers => 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPractices {
    UniqueStrong,
    SomeUnique,
    Similar,
    SameEverywhere,
}

impl Answer for PasswordPractices {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Unique strong passwords" => Some(Self::UniqueStrong),
            "Some unique passwords" => Some(Self::SomeUnique),
            "Similar passwords" => Some(Self::Similar),
            "Same password everywhere" => Some(Self::SameEverywhere),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::UniqueStrong => 0.0,
            Self::SomeUnique => 30.0,
            Self::Similar => 60.0,
            Self::SameEverywhere => 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoFactorAuth {
    AllAccounts,
    SomeAccounts,
    FewAccounts,
    Never,
}

impl Answer for TwoFactorAuth {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "On all accounts" => Some(Self::AllAccounts),
            "On some accounts" => Some(Self::SomeAccounts),
            "On few accounts" => Some(Self::FewAccounts),
            "Never" => Some(Self::Never),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::AllAccounts => 0.0,
            Self::SomeAccounts => 25.0,
            Self::FewAccounts => 60.0,
            Self::Never => 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacySettingsCheck {
    Regularly,
    WhenReminded,
    Rarely,
    Never,
}

impl Answer for PrivacySettingsCheck {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Regularly" => Some(Self::Regularly),
            "When reminded" => Some(Self::WhenReminded),
            "Rarely" => Some(Self::Rarely),
            "Never" => Some(Self::Never),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Regularly => 0.0,
            Self::WhenReminded => 25.0,
            Self::Rarely => 60.0,
            Self::Never => 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCollectionAwareness {
    VeryAware,
    SomewhatAware,
    NotVeryAware,
    NotAwareAtAll,
}

impl Answer for DataCollectionAwareness {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Very aware" => Some(Self::VeryAware),
            "Somewhat aware" => Some(Self::SomewhatAware),
            "Not very aware" => Some(Self::NotVeryAware),
            "Not aware at all" => Some(Self::NotAwareAtAll),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::VeryAware => 0.0,
            Self::SomewhatAware => 30.0,
            Self::NotVeryAware => 60.0,
            Self::NotAwareAtAll => 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionReview {
    Always,
    Usually,
    Sometimes,
    Never,
}

impl Answer for PermissionReview {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Always" => Some(Self::Always),
            "Usually" => Some(Self::Usually),
            "Sometimes" => Some(Self::Sometimes),
            "Never" => Some(Self::Never),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Always => 0.0,
            Self::Usually => 20.0,
            Self::Sometimes => 50.0,
            Self::Never => 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalInfoSharing {
    Never,
    Rarely,
    Sometimes,
    Frequently,
}

impl Answer for PersonalInfoSharing {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Never" => Some(Self::Never),
            "Rarely" => Some(Self::Rarely),
            "Sometimes" => Some(Self::Sometimes),
            "Frequently" => Some(Self::Frequently),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Never => 0.0,
            Self::Rarely => 20.0,
            Self::Sometimes => 60.0,
            Self::Frequently => 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThirdPartyConnections {
    Never,
    Rarely,
    Sometimes,
    Frequently,
}

impl Answer for ThirdPartyConnections {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Never" => Some(Self::Never),
            "Rarely" => Some(Self::Rarely),
            "Sometimes" => Some(Self::Sometimes),
            "Frequently" => Some(Self::Frequently),
            _ => None,
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Never => 0.0,
            Self::Rarely => 25.0,
            Self::Sometimes => 50.0,
            Self::Frequently => 80.0,
        }
    }
}

pub(crate) fn gaming_habits(r: &QuestionnaireResponse) -> f64 {
    let score = GamingFrequency::score(&r.gaming_frequency) * 0.3
        + MultiplayerGaming::score(&r.multiplayer_gaming) * 0.3
        + VoiceChat::score(&r.voice_chat) * 0.3
        + Streaming::score(&r.streaming) * 0.1;
    score.min(100.0)
}

pub(crate) fn account_security(r: &QuestionnaireResponse) -> f64 {
    let score = AccountSharing::score(&r.account_sharing) * 0.3
        + PasswordPractices::score(&r.password_practices) * 0.4
        + TwoFactorAuth::score(&r.two_factor_auth) * 0.3;
    score.min(100.0)
}

pub(crate) fn privacy_awareness(r: &QuestionnaireResponse) -> f64 {
    let score = PrivacySettingsCheck::score(&r.privacy_settings_check) * 0.4
        + DataCollectionAwareness::score(&r.data_collection_awareness) * 0.3
        + PermissionReview::score(&r.permission_review) * 0.3;
    score.min(100.0)
}

pub(crate) fn data_sharing_control(r: &QuestionnaireResponse) -> f64 {
    let score = PersonalInfoSharing::score(&r.personal_info_sharing) * 0.6
        + ThirdPartyConnections::score(&r.third_party_connections) * 0.4;
    score.min(100.0)
}
