//! Review entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub accommodation_id: i32,
    pub user_id: i32,

    #[sea_orm(column_type = "Decimal(Some((2, 1)))")]
    pub clean_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((2, 1)))")]
    pub communication_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((2, 1)))")]
    pub checkin_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((2, 1)))")]
    pub accuracy_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((2, 1)))")]
    pub location_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((2, 1)))")]
    pub value_rate: Decimal,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accommodation::Entity",
        from = "Column::AccommodationId",
        to = "super::accommodation::Column::Id",
        on_delete = "Cascade"
    )]
    Accommodation,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::accommodation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accommodation.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
