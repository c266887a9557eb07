//! Initial schema: users, shortcuts, collections, activities, workspace_settings

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
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
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Nickname).string_len(255).not_null())
                    .col(ColumnDef::new(Users::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Users::Role).string_len(16).not_null())
                    .col(ColumnDef::new(Users::RowStatus).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Shortcuts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Shortcuts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Shortcuts::CreatorId).integer().not_null())
                    .col(
                        ColumnDef::new(Shortcuts::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Shortcuts::Link).text().not_null())
                    .col(ColumnDef::new(Shortcuts::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Shortcuts::Description).text().not_null())
                    .col(ColumnDef::new(Shortcuts::Tag).text().not_null())
                    .col(ColumnDef::new(Shortcuts::Visibility).string_len(16).not_null())
                    .col(ColumnDef::new(Shortcuts::OgMetadata).text().not_null())
                    .col(ColumnDef::new(Shortcuts::RowStatus).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Shortcuts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Shortcuts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 列表查询按创建者与可见性过滤
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_shortcuts_creator_visibility")
                    .table(Shortcuts::Table)
                    .col(Shortcuts::CreatorId)
                    .col(Shortcuts::Visibility)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Collections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Collections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Collections::CreatorId).integer().not_null())
                    .col(
                        ColumnDef::new(Collections::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Collections::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Collections::Description).text().not_null())
                    .col(ColumnDef::new(Collections::ShortcutIds).text().not_null())
                    .col(
                        ColumnDef::new(Collections::Visibility)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Collections::RowStatus).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Collections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Collections::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activities::CreatorId).integer().not_null())
                    .col(
                        ColumnDef::new(Activities::ActivityType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Activities::Level).string_len(16).not_null())
                    .col(ColumnDef::new(Activities::Payload).text().not_null())
                    .col(
                        ColumnDef::new(Activities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkspaceSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkspaceSettings::Key)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkspaceSettings::Value).text().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkspaceSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Collections::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_shortcuts_creator_visibility")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Shortcuts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Nickname,
    Email,
    Role,
    RowStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Shortcuts {
    #[sea_orm(iden = "shortcuts")]
    Table,
    Id,
    CreatorId,
    Name,
    Link,
    Title,
    Description,
    Tag,
    Visibility,
    OgMetadata,
    RowStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Collections {
    #[sea_orm(iden = "collections")]
    Table,
    Id,
    CreatorId,
    Name,
    Title,
    Description,
    ShortcutIds,
    Visibility,
    RowStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Activities {
    #[sea_orm(iden = "activities")]
    Table,
    Id,
    CreatorId,
    ActivityType,
    Level,
    Payload,
    CreatedAt,
}

#[derive(DeriveIden)]
enum WorkspaceSettings {
    #[sea_orm(iden = "workspace_settings")]
    Table,
    Key,
    Value,
}
