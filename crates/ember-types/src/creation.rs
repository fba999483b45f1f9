use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional social links attached to a launch. Empty strings mean "not
/// provided"; the validator only checks syntax on non-empty values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub website: String,
    pub twitter: String,
    pub telegram: String,
}

/// Marker telling the creation service what kind of attachment rides along
/// with the token. Serialized as "twitch" or "none".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Twitch,
    None,
}

/// Live-status snapshot embedded into the metadata payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStatusSnapshot {
    pub live: bool,
    pub stream: StreamThumbnail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamThumbnail {
    pub thumbnail_url: Option<String>,
}

/// Metadata payload bundled into the creation request as one object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub title: String,
    pub user_id: Option<String>,
    pub thumbnail_url: Option<String>,
    pub streamer_profile_picture: Option<String>,
    pub full_status: LiveStatusSnapshot,
    pub social_links: SocialLinks,
    /// Content address of the uploaded video, empty when none was attached.
    pub video_link: String,
}

/// The single call made to the creation service. Assembled once per
/// submission attempt; the call is never retried to avoid creating the same
/// token twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenRequest {
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub description: String,
    /// Stream user name when a stream is attached, else the token name.
    pub display_name: String,
    pub stream_link: String,
    pub created_at: DateTime<Utc>,
    pub metadata: TokenMetadata,
    pub first_buy: bool,
    /// Token output in smallest units; zero when no first buy was requested.
    pub token_amount: u64,
    /// Slippage-bounded spend ceiling in smallest units; zero without a
    /// first buy.
    pub max_base_cost: u64,
    pub stream_user_id: Option<String>,
    pub attachment: AttachmentKind,
}

/// Response contract of the creation service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenResponse {
    pub success: bool,
    /// Identifier of the newly created token, used to navigate to its page.
    /// The service does not always return one even on success.
    #[serde(default)]
    pub token_id: Option<String>,
    /// Human-readable reason on failure.
    #[serde(default)]
    pub error: Option<String>,
}
