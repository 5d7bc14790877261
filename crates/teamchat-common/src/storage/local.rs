//! Local filesystem blob store

use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::signed_url::UrlSigner;
use super::FileStore;

/// Blob store writing under a configured directory on local disk
pub struct LocalFileStore {
    root: PathBuf,
    signer: UrlSigner,
}

impl LocalFileStore {
    /// Create a new store rooted at `root`
    pub fn new(root: impl Into<PathBuf>, signer: UrlSigner) -> Self {
        Self {
            root: root.into(),
            signer,
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, data: &[u8], filename: &str, content_type: &str) -> AppResult<String> {
        // Keys are server-generated; the client filename never touches a path
        let key = format!("blobs/{}", Uuid::new_v4());
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(AppError::storage)?;
        }
        tokio::fs::write(&path, data)
            .await
            .map_err(AppError::storage)?;

        tracing::debug!(
            key = %key,
            filename = %filename,
            content_type = %content_type,
            size = data.len(),
            "Stored blob"
        );

        Ok(key)
    }

    fn signed_url(&self, storage_key: &str, filename: &str) -> AppResult<String> {
        self.signer.sign(storage_key, filename)
    }
}
