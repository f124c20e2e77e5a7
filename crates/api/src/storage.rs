//! Listing image storage.
//!
//! The editor uploads an image once and stores only the resulting public
//! URL on the listing row. [`ImageStore`] abstracts the backend; the
//! default implementation writes to a local directory that the server
//! exposes read-only under `/uploads`.

use std::path::PathBuf;

use async_trait::async_trait;
use bookswap_core::error::CoreError;

/// Storage backend for uploaded listing images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the file under the given key (e.g. `"7/1700000000000-cover.png"`).
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError>;

    /// Public URL at which a stored key can be fetched.
    fn public_url(&self, key: &str) -> String;
}

/// Local-filesystem image store.
///
/// Keys map directly to paths under `root`; the key's owner-id prefix
/// becomes a subdirectory. Files are served by the router's `/uploads`
/// static route.
pub struct LocalImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalImageStore {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url,
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::Internal(format!("Failed to create upload dir: {e}")))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to store image: {e}")))?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/uploads/{key}", self.public_base_url)
    }
}
