use serde::{Deserialize, Serialize};

/// Maximum accepted token image size in bytes (5 MB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum accepted video size in bytes (100 MB).
pub const MAX_VIDEO_BYTES: u64 = 100 * 1024 * 1024;

/// An in-memory file handed over by the embedding surface, either from a
/// file picker or a drag-and-drop. Both entry points produce the same value
/// and go through the same validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub name: String,
    /// Declared MIME type, e.g. "image/png" or "video/mp4".
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the declared type indicates video content.
    pub fn is_video(&self) -> bool {
        self.mime.starts_with("video/")
    }
}

/// Summary of a selected file kept on the upload session, enough for the
/// embedding surface to render a name and size without holding the bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub size: u64,
}

impl From<&MediaFile> for FileSummary {
    fn from(file: &MediaFile) -> Self {
        Self {
            name: file.name.clone(),
            size: file.size(),
        }
    }
}

/// Lifecycle of the optional video attachment. At most one live session per
/// form; selecting a new file supersedes whatever came before it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum UploadState {
    /// Nothing selected; the drop zone is empty.
    Idle,

    /// A validated file is on its way to the content store.
    Uploading,

    /// The store accepted the file and returned a content address. The
    /// address is embedded into the creation request at submit time.
    Uploaded { content_address: String },

    /// The upload failed. The selected file has been cleared so the user
    /// retries from an empty drop zone.
    Failed { reason: String },
}

impl UploadState {
    pub fn content_address(&self) -> Option<&str> {
        match self {
            UploadState::Uploaded { content_address } => Some(content_address),
            _ => None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading)
    }
}
