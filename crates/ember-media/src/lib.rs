//! ember-media crate
//!
//! Media upload coordination: the storage-endpoint boundary and the video
//! upload session.

pub mod error;
pub mod http;
pub mod store;
pub mod video;

pub use error::MediaError;
pub use http::HttpMediaStore;
pub use store::MediaStore;
pub use video::{UploadEvent, VideoUploader};
