use async_trait::async_trait;
use ember_types::media::MediaFile;
use log::{debug, error};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::MediaError;
use crate::store::MediaStore;

#[derive(Deserialize)]
struct ImageUploadResponse {
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoUploadResponse {
    ipfs_url: String,
}

/// HTTP multipart client for the image- and content-storage endpoints.
pub struct HttpMediaStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMediaStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn file_part(file: &MediaFile) -> Result<Part, MediaError> {
        Ok(Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?)
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn put_image(&self, file: &MediaFile) -> Result<String, MediaError> {
        let url = format!("{}/api/posts/upload-image/temp", self.base_url);
        let form = Form::new().part("file", Self::file_part(file)?);

        debug!("uploading image {} ({} bytes)", file.name, file.size());
        let response = self.client.post(&url).multipart(form).send().await?;
        if !response.status().is_success() {
            error!("image upload rejected with status {}", response.status());
            return Err(MediaError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let body: ImageUploadResponse = response.json().await?;
        Ok(body.url)
    }

    async fn put_video(&self, file: &MediaFile) -> Result<String, MediaError> {
        let url = format!("{}/api/upload-video", self.base_url);
        let form = Form::new().part("video", Self::file_part(file)?);

        debug!("uploading video {} ({} bytes)", file.name, file.size());
        let response = self.client.post(&url).multipart(form).send().await?;
        if !response.status().is_success() {
            error!("video upload rejected with status {}", response.status());
            return Err(MediaError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let body: VideoUploadResponse = response.json().await?;
        Ok(body.ipfs_url)
    }
}
