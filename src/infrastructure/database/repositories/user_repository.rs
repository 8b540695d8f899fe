//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::debug;

use super::db_err;
use crate::domain::{DomainResult, NewSocialUser, SocialPlatform, User, UserRepository};
use crate::infrastructure::database::entities::{social_platform, user};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        email: m.email,
        name: m.name,
        phone_number: m.phone_number,
        profile_image: m.profile_image,
        date_of_birth: m.date_of_birth,
        social_platform_id: m.social_platform_id,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_platform_by_name(&self, name: &str) -> DomainResult<Option<SocialPlatform>> {
        let model = social_platform::Entity::find()
            .filter(social_platform::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(|m| SocialPlatform {
            id: m.id,
            name: m.name,
        }))
    }

    async fn get_or_create_social(&self, new_user: NewSocialUser) -> DomainResult<(User, bool)> {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(new_user.email.as_str()))
            .filter(user::Column::SocialPlatformId.eq(new_user.social_platform_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if let Some(existing) = existing {
            return Ok((model_to_domain(existing), false));
        }

        debug!("Registering social user: {}", new_user.email);
        let model = user::ActiveModel {
            email: Set(new_user.email),
            name: Set(new_user.name),
            phone_number: Set(None),
            profile_image: Set(new_user.profile_image),
            date_of_birth: Set(None),
            social_platform_id: Set(new_user.social_platform_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok((model_to_domain(model), true))
    }
}
