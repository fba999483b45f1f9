use serde::{Deserialize, Serialize};

/// Status of a creator's stream as reported by the external lookup
/// provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StreamStatus {
    /// No creator matched the given URL.
    NotFound,
    /// The creator exists but is not currently live.
    Offline,
    /// The creator is live.
    Live(LiveStream),
}

impl StreamStatus {
    pub fn live(&self) -> Option<&LiveStream> {
        match self {
            StreamStatus::Live(stream) => Some(stream),
            _ => None,
        }
    }
}

/// A live stream as returned by the lookup provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStream {
    pub title: String,
    pub user_id: String,
    pub user_name: String,
    /// Thumbnail URL template carrying a `{width}x{height}` placeholder the
    /// caller substitutes before use.
    pub thumbnail_url: Option<String>,
}

impl LiveStream {
    /// Substitute the provider's size placeholder with concrete dimensions.
    pub fn thumbnail_at(&self, width: u32, height: u32) -> Option<String> {
        self.thumbnail_url
            .as_ref()
            .map(|template| template.replace("{width}x{height}", &format!("{}x{}", width, height)))
    }
}

/// Full lookup result: the stream status plus creator profile data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorStatus {
    pub status: StreamStatus,
    pub profile_image_url: Option<String>,
}
