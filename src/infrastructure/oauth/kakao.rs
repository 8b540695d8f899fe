//! Kakao user-info client
//!
//! Implements [`SocialIdentityProvider`] by calling `GET /v2/user/me` with the
//! client's access token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{IdentityError, SocialIdentityProvider, SocialProfile};
use crate::config::KakaoConfig;
use crate::domain::SocialPlatform;

#[derive(Debug, Default, Deserialize)]
struct KakaoUser {
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoAccount {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    profile: Option<KakaoProfile>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoProfile {
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    thumbnail_image_url: Option<String>,
}

impl From<KakaoUser> for SocialProfile {
    fn from(user: KakaoUser) -> Self {
        let account = user.kakao_account.unwrap_or_default();
        let profile = account.profile.unwrap_or_default();
        SocialProfile {
            email: account.email,
            nickname: profile.nickname,
            thumbnail_image_url: profile.thumbnail_image_url,
        }
    }
}

pub struct KakaoIdentityProvider {
    client: Client,
    user_info_url: String,
}

impl KakaoIdentityProvider {
    pub fn new(config: &KakaoConfig) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IdentityError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_info_url: config.user_info_url.clone(),
        })
    }
}

#[async_trait]
impl SocialIdentityProvider for KakaoIdentityProvider {
    fn platform(&self) -> &'static str {
        SocialPlatform::KAKAO
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<SocialProfile, IdentityError> {
        let response = self
            .client
            .get(&self.user_info_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(format!("Kakao request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Rejected(status.as_u16()));
        }

        let user: KakaoUser = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;

        Ok(user.into())
    }
}
