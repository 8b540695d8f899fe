//! Accommodation (listing) entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accommodations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Cleared when the category is deleted
    #[sea_orm(nullable)]
    pub category_id: Option<i32>,

    /// Host
    pub user_id: i32,

    pub title: String,
    pub address: String,

    #[sea_orm(column_type = "Decimal(Some((9, 6)))")]
    pub latitude: Decimal,

    #[sea_orm(column_type = "Decimal(Some((9, 6)))")]
    pub longitude: Decimal,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub max_capacity: i32,

    /// Nightly price
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cleaning_fee: Decimal,

    pub number_of_bed: i32,
    pub number_of_bedroom: i32,
    pub number_of_bathroom: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Host,
    #[sea_orm(has_many = "super::image::Entity")]
    Images,
    #[sea_orm(has_many = "super::unavailable_date::Entity")]
    UnavailableDates,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Host.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::unavailable_date::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnavailableDates.def()
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
