//! Create social_platforms and users tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SocialPlatforms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SocialPlatforms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SocialPlatforms::Name).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string_len(50).not_null())
                    .col(ColumnDef::new(Users::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Users::PhoneNumber).string_len(20))
                    .col(ColumnDef::new(Users::ProfileImage).string_len(2000).not_null())
                    .col(ColumnDef::new(Users::DateOfBirth).date())
                    .col(ColumnDef::new(Users::SocialPlatformId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_social_platform")
                            .from(Users::Table, Users::SocialPlatformId)
                            .to(SocialPlatforms::Table, SocialPlatforms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_email_platform")
                    .table(Users::Table)
                    .col(Users::Email)
                    .col(Users::SocialPlatformId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SocialPlatforms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum SocialPlatforms {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Email,
    Name,
    PhoneNumber,
    ProfileImage,
    DateOfBirth,
    SocialPlatformId,
}
