use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::policy::{resolve_content_type, sanitize_sub_dir, stored_name, UploadKind};
use crate::config::UploadConfig;

/// Where an accepted file ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    pub url: String,
    pub file_name: String,
    pub original_name: String,
    pub content_type: String,
    pub size: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{0}")]
    Rejected(String),
    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_file_size: u64,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self {
            root: root.into(),
            max_file_size,
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.directory.clone(), config.max_file_size)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Validates and writes one file to `<root>/<sub_dir>/<uuid><ext>`.
    pub async fn store(
        &self,
        kind: UploadKind,
        sub_dir: Option<&str>,
        original_name: &str,
        declared_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredFile, UploadError> {
        let content_type = resolve_content_type(declared_type, original_name);
        let size = bytes.len() as u64;
        kind.check(&content_type, size, self.max_file_size)
            .map_err(UploadError::Rejected)?;

        let sub_dir = sanitize_sub_dir(sub_dir);
        let directory = self.root.join(&sub_dir);
        tokio::fs::create_dir_all(&directory).await?;

        let file_name = stored_name(original_name);
        tokio::fs::write(directory.join(&file_name), bytes).await?;
        info!(%sub_dir, %file_name, %content_type, size, "upload stored");

        Ok(StoredFile {
            url: format!("/uploads/{sub_dir}/{file_name}"),
            file_name,
            original_name: original_name.to_string(),
            content_type,
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_file_under_sanitized_sub_dir() {
        let root = tempfile::tempdir().expect("temp dir");
        let store = UploadStore::new(root.path(), 1024);

        let stored = store
            .store(UploadKind::Image, Some("Properties"), "front view.png", None, b"png-bytes")
            .await
            .expect("stored");

        assert!(stored.url.starts_with("/uploads/properties/"));
        assert!(stored.file_name.ends_with(".png"));
        assert_eq!(stored.content_type, "image/png");
        let on_disk = std::fs::read(root.path().join("properties").join(&stored.file_name))
            .expect("file written");
        assert_eq!(on_disk, b"png-bytes");
    }

    #[tokio::test]
    async fn rejects_before_touching_disk() {
        let root = tempfile::tempdir().expect("temp dir");
        let store = UploadStore::new(root.path(), 4);

        let err = store
            .store(UploadKind::Any, None, "deed.pdf", Some("application/pdf"), b"too large")
            .await
            .expect_err("too large");
        assert!(matches!(err, UploadError::Rejected(_)));

        let err = store
            .store(UploadKind::Any, None, "run.sh", None, b"ls")
            .await
            .expect_err("type rejected");
        assert_eq!(err.to_string(), "File type not allowed");
        assert!(!root.path().join("general").exists());
    }
}
