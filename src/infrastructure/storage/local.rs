//! Filesystem-backed object store
//!
//! Objects are written under a root directory and served from
//! `public_base_url` (the HTTP router mounts the same directory at `/media`).

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::{ObjectStore, StorageError};

pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.starts_with('.') {
            return Err(StorageError::Backend(format!("invalid object key: {:?}", key)));
        }
        Ok(self.root.join(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        key: &str,
        _content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let path = self.object_path(key)?;
        fs::create_dir_all(&self.root).await?;
        fs::write(&path, bytes).await?;
        debug!(path = %path.display(), "Stored object");
        Ok(self.public_url(key))
    }
}
