use async_trait::async_trait;

use super::model::{NewSocialUser, SocialPlatform, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    async fn find_platform_by_name(&self, name: &str) -> DomainResult<Option<SocialPlatform>>;

    /// Return the user registered with `email` on the platform, creating it
    /// from `new_user` when absent. The flag is `true` when a row was inserted.
    async fn get_or_create_social(&self, new_user: NewSocialUser) -> DomainResult<(User, bool)>;
}
