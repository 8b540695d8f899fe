//! User entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub email: String,
    pub name: String,

    #[sea_orm(nullable)]
    pub phone_number: Option<String>,

    pub profile_image: String,

    #[sea_orm(nullable)]
    pub date_of_birth: Option<Date>,

    pub social_platform_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::social_platform::Entity",
        from = "Column::SocialPlatformId",
        to = "super::social_platform::Column::Id",
        on_delete = "Cascade"
    )]
    SocialPlatform,
    #[sea_orm(has_many = "super::accommodation::Entity")]
    Accommodations,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
}

impl Related<super::social_platform::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialPlatform.def()
    }
}

impl Related<super::accommodation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accommodations.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
