//! Media store port - where uploaded post images live.

use async_trait::async_trait;

/// A stored object returned to clients.
#[derive(Debug, Clone)]
pub struct MediaObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store an upload and return the reference to put on a post.
    async fn put(&self, content_type: &str, bytes: &[u8]) -> Result<String, MediaError>;

    /// Load a previously stored object.
    async fn get(&self, reference: &str) -> Result<Option<MediaObject>, MediaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    #[error("Empty upload")]
    Empty,

    #[error("Invalid media reference")]
    InvalidReference,

    #[error("Storage error: {0}")]
    Storage(String),
}
