//! File object storage
//!
//! The chat core stores attachment blobs through the `FileStore` port and
//! hands clients signed, time-limited URLs rather than raw paths.

mod local;
mod signed_url;

pub use local::LocalFileStore;
pub use signed_url::{BlobClaims, UrlSigner};

use async_trait::async_trait;

use crate::error::AppResult;

/// Port for the file-object store collaborator
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store a blob with metadata and return its opaque storage key
    async fn put(&self, data: &[u8], filename: &str, content_type: &str) -> AppResult<String>;

    /// Generate a time-limited access URL for a stored blob
    fn signed_url(&self, storage_key: &str, filename: &str) -> AppResult<String>;
}
