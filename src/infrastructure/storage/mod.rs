//! Object storage adapters for uploaded listing images

pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use std::sync::Arc;

use crate::application::ports::{ObjectStore, StorageError};
use crate::config::{StorageBackendKind, StorageConfig};

pub use local::LocalObjectStore;
#[cfg(feature = "s3")]
pub use s3::S3ObjectStore;

/// Build the store selected by `storage.backend`.
pub async fn build_object_store(
    config: &StorageConfig,
) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.backend {
        StorageBackendKind::Local => Ok(Arc::new(LocalObjectStore::new(
            config.local_dir.clone(),
            config.public_base_url.clone(),
        ))),
        #[cfg(feature = "s3")]
        StorageBackendKind::S3 => Ok(Arc::new(
            S3ObjectStore::connect(config.bucket.clone(), config.region.clone()).await,
        )),
        #[cfg(not(feature = "s3"))]
        StorageBackendKind::S3 => Err(StorageError::Backend(
            "the s3 backend requires building with the `s3` feature".into(),
        )),
    }
}
