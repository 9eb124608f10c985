//! Media store backed by a directory on the local file system.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use inkwell_core::ports::{MediaError, MediaObject, MediaStore};

/// Accepted upload types and the extension each is stored under.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    IMAGE_TYPES
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(essence))
        .map(|(_, ext)| *ext)
}

fn content_type_for(extension: &str) -> Option<&'static str> {
    IMAGE_TYPES
        .iter()
        .find(|(_, ext)| *ext == extension)
        .map(|(mime, _)| *mime)
}

/// Stores each upload as `<uuid>.<ext>` directly under `root`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Only references this store handed out resolve to a path.
    fn resolve(&self, reference: &str) -> Result<(PathBuf, &'static str), MediaError> {
        let (stem, extension) = reference
            .split_once('.')
            .ok_or(MediaError::InvalidReference)?;
        Uuid::parse_str(stem).map_err(|_| MediaError::InvalidReference)?;
        let content_type = content_type_for(extension).ok_or(MediaError::InvalidReference)?;
        Ok((self.root.join(reference), content_type))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn put(&self, content_type: &str, bytes: &[u8]) -> Result<String, MediaError> {
        let extension = extension_for(content_type)
            .ok_or_else(|| MediaError::UnsupportedType(content_type.to_string()))?;
        if bytes.is_empty() {
            return Err(MediaError::Empty);
        }

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| MediaError::Storage(e.to_string()))?;

        let reference = format!("{}.{extension}", Uuid::new_v4());
        fs::write(self.root.join(&reference), bytes)
            .await
            .map_err(|e| MediaError::Storage(e.to_string()))?;

        tracing::info!(%reference, size = bytes.len(), "Media stored");
        Ok(reference)
    }

    async fn get(&self, reference: &str) -> Result<Option<MediaObject>, MediaError> {
        let (path, content_type) = self.resolve(reference)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(MediaObject {
                content_type: content_type.to_string(),
                bytes,
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MediaError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path().join("media"));

        let reference = store.put("image/png", b"\x89PNG data").await.unwrap();
        assert!(reference.ends_with(".png"));

        let object = store.get(&reference).await.unwrap().unwrap();
        assert_eq!(object.content_type, "image/png");
        assert_eq!(object.bytes, b"\x89PNG data");
    }

    #[tokio::test]
    async fn test_content_type_parameters_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        let reference = store.put("Image/JPEG; charset=binary", b"jpeg").await.unwrap();

        assert!(reference.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_rejects_non_images_and_empty_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        let text = store.put("text/plain", b"hello").await;
        assert!(matches!(text, Err(MediaError::UnsupportedType(_))));

        let empty = store.put("image/gif", b"").await;
        assert!(matches!(empty, Err(MediaError::Empty)));
    }

    #[tokio::test]
    async fn test_get_rejects_foreign_references() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        for reference in ["../etc/passwd", "notes.txt", "missing-dot", "abc.png"] {
            let result = store.get(reference).await;
            assert!(
                matches!(result, Err(MediaError::InvalidReference)),
                "{reference}"
            );
        }
    }

    #[tokio::test]
    async fn test_get_unknown_reference_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        let reference = format!("{}.webp", Uuid::new_v4());

        assert!(store.get(&reference).await.unwrap().is_none());
    }
}
