//! Outbound ports: third-party identity and object storage
//!
//! [`SocialIdentityProvider`] is implemented by the Kakao client in
//! `infrastructure::oauth`; [`ObjectStore`] by the local filesystem store and,
//! with the `s3` feature, by the S3 store in `infrastructure::storage`.

use async_trait::async_trait;
use thiserror::Error;

// ── Social identity ────────────────────────────────────────────

/// Profile fields read from the provider. Each one may be absent in the
/// provider response; the service decides which are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialProfile {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub thumbnail_image_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider answered with a non-success status
    #[error("Provider rejected the access token (HTTP {0})")]
    Rejected(u16),

    #[error("Provider response could not be decoded: {0}")]
    Malformed(String),

    #[error("Provider unreachable: {0}")]
    Transport(String),
}

#[async_trait]
pub trait SocialIdentityProvider: Send + Sync {
    /// Name of the `social_platforms` row users of this provider belong to
    fn platform(&self) -> &'static str;

    /// Exchange a provider access token for the user's profile
    async fn fetch_profile(&self, access_token: &str) -> Result<SocialProfile, IdentityError>;
}

// ── Object storage ─────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` and return the public URL of the object
    async fn put(
        &self,
        key: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError>;
}
