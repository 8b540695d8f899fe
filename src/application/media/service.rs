//! Media service
//!
//! Stores uploaded listing images through the configured [`ObjectStore`]
//! under random keys.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::ports::{ObjectStore, StorageError};

/// One file received from the client
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("No files were uploaded")]
    NoFiles,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct MediaService {
    store: Arc<dyn ObjectStore>,
}

impl MediaService {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Store every file under a random key and return their public URLs in
    /// upload order.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<String>, MediaError> {
        if files.is_empty() {
            return Err(MediaError::NoFiles);
        }

        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            let key = object_key(file.file_name.as_deref());
            let url = self
                .store
                .put(&key, file.content_type.as_deref(), file.bytes)
                .await?;
            urls.push(url);
        }

        info!(count = urls.len(), "Uploaded listing images");
        Ok(urls)
    }
}

/// Longest file extension carried over into an object key
const MAX_EXTENSION_LEN: usize = 10;

/// `<uuid v4>` plus the original extension, e.g. `4f1c...e2.jpg`.
///
/// Extensions that are not short ASCII-alphanumeric runs are dropped, so the
/// key never contains separators or other characters a store may refuse.
pub fn object_key(file_name: Option<&str>) -> String {
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();
    format!("{}{}", Uuid::new_v4(), extension)
}
