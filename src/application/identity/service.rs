//! Identity service
//!
//! Exchanges a provider access token for a local user and a session token,
//! and resolves session tokens back to users on protected routes.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::{AuthError, SignInError};
use crate::application::ports::SocialIdentityProvider;
use crate::domain::{DomainError, NewSocialUser, RepositoryProvider, User};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};

#[derive(Debug, Clone)]
pub struct SignInResult {
    pub access_token: String,
    pub user: User,
    /// Whether this sign-in registered the user
    pub created: bool,
}

/// Accept both `Bearer <token>` and a bare token.
pub fn strip_bearer(header: &str) -> &str {
    header.strip_prefix("Bearer ").unwrap_or(header).trim()
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    provider: Arc<dyn SocialIdentityProvider>,
    jwt_config: JwtConfig,
    default_profile_image: String,
}

impl IdentityService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        provider: Arc<dyn SocialIdentityProvider>,
        jwt_config: JwtConfig,
        default_profile_image: String,
    ) -> Self {
        Self {
            repos,
            provider,
            jwt_config,
            default_profile_image,
        }
    }

    pub async fn sign_in(&self, access_token: Option<&str>) -> Result<SignInResult, SignInError> {
        let token = access_token
            .map(strip_bearer)
            .filter(|t| !t.is_empty())
            .ok_or(SignInError::MissingToken)?;

        let profile = self.provider.fetch_profile(token).await.map_err(|e| {
            warn!(platform = self.provider.platform(), error = %e, "Social profile lookup failed");
            e
        })?;

        let email = profile
            .email
            .ok_or_else(|| DomainError::MissingKey("kakao_account.email".into()))?;
        let name = profile
            .nickname
            .ok_or_else(|| DomainError::MissingKey("kakao_account.profile.nickname".into()))?;

        let platform_name = self.provider.platform();
        let platform = self
            .repos
            .users()
            .find_platform_by_name(platform_name)
            .await?
            .ok_or_else(|| DomainError::not_found("SocialPlatform", "name", platform_name))?;

        let (user, created) = self
            .repos
            .users()
            .get_or_create_social(NewSocialUser {
                email,
                name,
                profile_image: profile
                    .thumbnail_image_url
                    .unwrap_or_else(|| self.default_profile_image.clone()),
                social_platform_id: platform.id,
            })
            .await?;

        let access_token = create_token(user.id, &self.jwt_config)
            .map_err(|e| SignInError::Token(e.to_string()))?;

        if created {
            info!(user_id = user.id, platform = platform_name, "New user registered");
        } else {
            info!(user_id = user.id, platform = platform_name, "User signed in");
        }

        Ok(SignInResult {
            access_token,
            user,
            created,
        })
    }

    /// Resolve an `Authorization` header value to the user it was issued to.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<User, AuthError> {
        let token = authorization
            .map(strip_bearer)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = verify_token(token, &self.jwt_config).map_err(|e| {
            warn!(error = %e, "Rejected session token");
            AuthError::InvalidToken
        })?;

        self.repos
            .users()
            .find_by_id(claims.user)
            .await?
            .ok_or(AuthError::UnknownUser(claims.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{IdentityError, SocialProfile};
    use crate::application::testing::{MemoryRepositories, StubIdentityProvider};
    use crate::domain::SocialPlatform;

    const DEFAULT_IMAGE: &str = "https://example.com/blank.png";

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "secret".into(),
            expiration_hours: 1,
        }
    }

    fn repos_with_kakao() -> MemoryRepositories {
        let mut repos = MemoryRepositories::default();
        repos.users.platforms = vec![SocialPlatform {
            id: 1,
            name: SocialPlatform::KAKAO.into(),
        }];
        repos
    }

    fn profile() -> SocialProfile {
        SocialProfile {
            email: Some("guest@example.com".into()),
            nickname: Some("게스트".into()),
            thumbnail_image_url: None,
        }
    }

    fn service(
        repos: Arc<MemoryRepositories>,
        answer: Result<SocialProfile, IdentityError>,
    ) -> IdentityService {
        IdentityService::new(
            repos,
            Arc::new(StubIdentityProvider::returning(answer)),
            jwt(),
            DEFAULT_IMAGE.into(),
        )
    }

    #[test]
    fn bearer_prefix_is_optional() {
        assert_eq!(strip_bearer("Bearer abc"), "abc");
        assert_eq!(strip_bearer("abc"), "abc");
    }

    #[tokio::test]
    async fn sign_in_registers_then_reuses_user() {
        let repos = Arc::new(repos_with_kakao());

        let first = service(repos.clone(), Ok(profile()))
            .sign_in(Some("kakao-token"))
            .await
            .unwrap();
        assert!(first.created);
        assert_eq!(first.user.profile_image, DEFAULT_IMAGE);
        assert_eq!(first.user.name, "게스트");

        let second = service(repos.clone(), Ok(profile()))
            .sign_in(Some("Bearer kakao-token"))
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.user.id, first.user.id);

        let claims = verify_token(&second.access_token, &jwt()).unwrap();
        assert_eq!(claims.user, first.user.id);
    }

    #[tokio::test]
    async fn missing_token_is_rejected_before_provider_call() {
        let svc = service(Arc::new(repos_with_kakao()), Ok(profile()));
        assert!(matches!(svc.sign_in(None).await, Err(SignInError::MissingToken)));
        assert!(matches!(svc.sign_in(Some("")).await, Err(SignInError::MissingToken)));
    }

    #[tokio::test]
    async fn provider_rejection_is_surfaced() {
        let svc = service(Arc::new(repos_with_kakao()), Err(IdentityError::Rejected(401)));
        assert!(matches!(
            svc.sign_in(Some("bad")).await,
            Err(SignInError::Provider(IdentityError::Rejected(401)))
        ));
    }

    #[tokio::test]
    async fn profile_without_email_is_missing_key() {
        let svc = service(
            Arc::new(repos_with_kakao()),
            Ok(SocialProfile {
                email: None,
                ..profile()
            }),
        );
        assert!(matches!(
            svc.sign_in(Some("t")).await,
            Err(SignInError::Domain(DomainError::MissingKey(_)))
        ));
    }

    #[tokio::test]
    async fn missing_platform_row_is_not_found() {
        let svc = service(Arc::new(MemoryRepositories::default()), Ok(profile()));
        assert!(matches!(
            svc.sign_in(Some("t")).await,
            Err(SignInError::Domain(DomainError::NotFound {
                entity: "SocialPlatform",
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn authenticate_resolves_user() {
        let repos = Arc::new(repos_with_kakao());
        let svc = service(repos.clone(), Ok(profile()));
        let signed_in = svc.sign_in(Some("t")).await.unwrap();

        let user = svc
            .authenticate(Some(&signed_in.access_token))
            .await
            .unwrap();
        assert_eq!(user.id, signed_in.user.id);
    }

    #[tokio::test]
    async fn authenticate_error_kinds() {
        let svc = service(Arc::new(repos_with_kakao()), Ok(profile()));

        assert!(matches!(svc.authenticate(None).await, Err(AuthError::MissingToken)));
        assert!(matches!(
            svc.authenticate(Some("garbage")).await,
            Err(AuthError::InvalidToken)
        ));

        let orphan = create_token(404, &jwt()).unwrap();
        assert!(matches!(
            svc.authenticate(Some(&orphan)).await,
            Err(AuthError::UnknownUser(404))
        ));
    }
}
