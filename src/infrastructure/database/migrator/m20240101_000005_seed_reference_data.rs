//! Seed reference rows: social platforms, room-type categories and
//! reservation statuses

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::SocialPlatforms;
use super::m20240101_000002_create_accommodations::Categories;
use super::m20240101_000004_create_reservations::ReservationStatus;
use crate::domain::{ReservationStatus as Status, RoomType, SocialPlatform};

#[derive(DeriveMigrationName)]
pub struct Migration;

const STATUSES: [Status; 3] = [Status::Pending, Status::Booked, Status::Canceled];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(SocialPlatforms::Table)
                    .columns([SocialPlatforms::Name])
                    .values_panic([SocialPlatform::KAKAO.into()])
                    .to_owned(),
            )
            .await?;

        let mut categories = Query::insert();
        categories
            .into_table(Categories::Table)
            .columns([Categories::Name, Categories::Description]);
        for room_type in RoomType::ALL {
            categories.values_panic([
                room_type.display_name().into(),
                room_type.description().into(),
            ]);
        }
        manager.exec_stmt(categories).await?;

        let mut statuses = Query::insert();
        statuses
            .into_table(ReservationStatus::Table)
            .columns([ReservationStatus::Code, ReservationStatus::Name]);
        for status in STATUSES {
            statuses.values_panic([status.code().into(), status.as_str().into()]);
        }
        manager.exec_stmt(statuses).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(ReservationStatus::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Categories::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(SocialPlatforms::Table).to_owned())
            .await
    }
}
