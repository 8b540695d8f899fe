//! Create reviews table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_accommodations::Accommodations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::AccommodationId).integer().not_null())
                    .col(ColumnDef::new(Reviews::UserId).integer().not_null())
                    .col(rate(Reviews::CleanRate))
                    .col(rate(Reviews::CommunicationRate))
                    .col(rate(Reviews::CheckinRate))
                    .col(rate(Reviews::AccuracyRate))
                    .col(rate(Reviews::LocationRate))
                    .col(rate(Reviews::ValueRate))
                    .col(ColumnDef::new(Reviews::Content).text().not_null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reviews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_accommodation")
                            .from(Reviews::Table, Reviews::AccommodationId)
                            .to(Accommodations::Table, Accommodations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_user")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_accommodation")
                    .table(Reviews::Table)
                    .col(Reviews::AccommodationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

/// 0.0 – 5.0 with one decimal
fn rate(column: Reviews) -> ColumnDef {
    ColumnDef::new(column).decimal_len(2, 1).not_null().to_owned()
}

#[derive(Iden)]
pub enum Reviews {
    Table,
    Id,
    AccommodationId,
    UserId,
    CleanRate,
    CommunicationRate,
    CheckinRate,
    AccuracyRate,
    LocationRate,
    ValueRate,
    Content,
    CreatedAt,
    UpdatedAt,
}
