use async_trait::async_trait;
use ember_types::stream::{CreatorStatus, LiveStream, StreamStatus};
use log::debug;
use serde::Deserialize;

use crate::lookup::{StreamLookup, StreamLookupError};

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    status: Option<RawStatus>,
    #[serde(default)]
    creator: Option<RawCreator>,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    live: bool,
    #[serde(default)]
    stream: Option<RawStream>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStream {
    title: String,
    user_id: String,
    user_name: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCreator {
    #[serde(default)]
    profile_image_url: Option<String>,
}

fn into_creator_status(body: LookupResponse) -> CreatorStatus {
    let profile_image_url = body.creator.and_then(|creator| creator.profile_image_url);

    let status = match body.status {
        None => StreamStatus::NotFound,
        Some(RawStatus { live: false, .. }) | Some(RawStatus { stream: None, .. }) => {
            StreamStatus::Offline
        }
        Some(RawStatus {
            stream: Some(stream),
            ..
        }) => StreamStatus::Live(LiveStream {
            title: stream.title,
            user_id: stream.user_id,
            user_name: stream.user_name,
            thumbnail_url: stream.thumbnail_url,
        }),
    };

    CreatorStatus {
        status,
        profile_image_url,
    }
}

/// HTTP client for the stream-status endpoint.
pub struct HttpStreamLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStreamLookup {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl StreamLookup for HttpStreamLookup {
    async fn creator_status(
        &self,
        stream_url: &str,
    ) -> Result<CreatorStatus, StreamLookupError> {
        let url = format!("{}/api/stream-status", self.base_url);

        debug!("looking up stream status for {}", stream_url);
        let response = self
            .client
            .get(&url)
            .query(&[("url", stream_url)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(CreatorStatus {
                status: StreamStatus::NotFound,
                profile_image_url: None,
            });
        }
        if !response.status().is_success() {
            return Err(StreamLookupError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let body: LookupResponse = response.json().await?;
        Ok(into_creator_status(body))
    }
}
