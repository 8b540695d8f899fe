//! Create categories, accommodations, images and unavailable_dates tables

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string_len(20).not_null())
                    .col(ColumnDef::new(Categories::Description).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accommodations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accommodations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accommodations::CategoryId).integer())
                    .col(ColumnDef::new(Accommodations::UserId).integer().not_null())
                    .col(ColumnDef::new(Accommodations::Title).string_len(300).not_null())
                    .col(ColumnDef::new(Accommodations::Address).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Accommodations::Latitude)
                            .decimal_len(9, 6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accommodations::Longitude)
                            .decimal_len(9, 6)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accommodations::Description).text().not_null())
                    .col(ColumnDef::new(Accommodations::MaxCapacity).integer().not_null())
                    .col(
                        ColumnDef::new(Accommodations::Price)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accommodations::CleaningFee)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Accommodations::NumberOfBed).integer().not_null())
                    .col(ColumnDef::new(Accommodations::NumberOfBedroom).integer().not_null())
                    .col(ColumnDef::new(Accommodations::NumberOfBathroom).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accommodations_category")
                            .from(Accommodations::Table, Accommodations::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accommodations_host")
                            .from(Accommodations::Table, Accommodations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Images::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Images::AccommodationId).integer().not_null())
                    .col(ColumnDef::new(Images::ImageUrl).string_len(2000).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_images_accommodation")
                            .from(Images::Table, Images::AccommodationId)
                            .to(Accommodations::Table, Accommodations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UnavailableDates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UnavailableDates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UnavailableDates::AccommodationId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UnavailableDates::StartDate).date().not_null())
                    .col(ColumnDef::new(UnavailableDates::EndDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_unavailable_dates_accommodation")
                            .from(UnavailableDates::Table, UnavailableDates::AccommodationId)
                            .to(Accommodations::Table, Accommodations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_images_accommodation")
                    .table(Images::Table)
                    .col(Images::AccommodationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_unavailable_dates_accommodation")
                    .table(UnavailableDates::Table)
                    .col(UnavailableDates::AccommodationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UnavailableDates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accommodations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Categories {
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
pub enum Accommodations {
    Table,
    Id,
    CategoryId,
    UserId,
    Title,
    Address,
    Latitude,
    Longitude,
    Description,
    MaxCapacity,
    Price,
    CleaningFee,
    NumberOfBed,
    NumberOfBedroom,
    NumberOfBathroom,
}

#[derive(Iden)]
pub enum Images {
    Table,
    Id,
    AccommodationId,
    ImageUrl,
}

#[derive(Iden)]
pub enum UnavailableDates {
    Table,
    Id,
    AccommodationId,
    StartDate,
    EndDate,
}
