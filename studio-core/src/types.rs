use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The public face of a user, returned by every successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// Input to account provisioning. Fields are optional so that a missing
/// field and an empty one are rejected the same way.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewAccount {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Identity assertion handed over by a third-party provider after it has
/// authenticated the user.
#[derive(Debug, Clone)]
pub struct FederatedIdentity {
    /// Provider name as reported by the callback route (e.g. "google").
    pub provider: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Sign-in providers known to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Credentials,
    Google,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Credentials => "credentials",
            Provider::Google => "google",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "credentials" => Some(Provider::Credentials),
            "google" => Some(Provider::Google),
            _ => None,
        }
    }

    /// Whether this provider signs users in through an external identity assertion.
    pub fn is_federated(&self) -> bool {
        !matches!(self, Provider::Credentials)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeStatus {
    Recording,
    Processing,
    Ready,
    Published,
}

impl EpisodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeStatus::Recording => "recording",
            EpisodeStatus::Processing => "processing",
            EpisodeStatus::Ready => "ready",
            EpisodeStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "recording" => Some(EpisodeStatus::Recording),
            "processing" => Some(EpisodeStatus::Processing),
            "ready" => Some(EpisodeStatus::Ready),
            "published" => Some(EpisodeStatus::Published),
            _ => None,
        }
    }
}

/// What a recording captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordingKind {
    Audio,
    Video,
    Screen,
}

impl RecordingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordingKind::Audio => "audio",
            RecordingKind::Video => "video",
            RecordingKind::Screen => "screen",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "audio" => Some(RecordingKind::Audio),
            "video" => Some(RecordingKind::Video),
            "screen" => Some(RecordingKind::Screen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PublishPlatform {
    Spotify,
    Youtube,
    Apple,
}

impl PublishPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishPlatform::Spotify => "spotify",
            PublishPlatform::Youtube => "youtube",
            PublishPlatform::Apple => "apple",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "spotify" => Some(PublishPlatform::Spotify),
            "youtube" => Some(PublishPlatform::Youtube),
            "apple" => Some(PublishPlatform::Apple),
            _ => None,
        }
    }
}

/// Where an episode stands on one publishing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PublishState {
    Scheduled,
    Published,
    Failed,
}

impl PublishState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishState::Scheduled => "scheduled",
            PublishState::Published => "published",
            PublishState::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(PublishState::Scheduled),
            "published" => Some(PublishState::Published),
            "failed" => Some(PublishState::Failed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing_is_case_insensitive() {
        assert_eq!(Provider::parse("Google"), Some(Provider::Google));
        assert_eq!(Provider::parse("credentials"), Some(Provider::Credentials));
        assert_eq!(Provider::parse("github"), None);
    }

    #[test]
    fn test_only_external_providers_are_federated() {
        assert!(Provider::Google.is_federated());
        assert!(!Provider::Credentials.is_federated());
    }

    #[test]
    fn test_episode_status_values() {
        for status in [
            EpisodeStatus::Recording,
            EpisodeStatus::Processing,
            EpisodeStatus::Ready,
            EpisodeStatus::Published,
        ] {
            assert_eq!(EpisodeStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EpisodeStatus::parse("draft"), None);
    }

    #[test]
    fn test_unknown_platform_and_state_rejected() {
        assert_eq!(PublishPlatform::parse("soundcloud"), None);
        assert_eq!(PublishState::parse("pending"), None);
        assert_eq!(RecordingKind::parse("Audio"), None);
    }

    #[test]
    fn test_identity_serializes_camel_case() {
        let identity = UserIdentity {
            id: Uuid::nil(),
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            avatar_url: None,
        };
        let json = serde_json::to_value(&identity).unwrap();
        assert!(json.get("avatarUrl").is_some());
        assert_eq!(json["email"], "ada@x.com");
    }
}
