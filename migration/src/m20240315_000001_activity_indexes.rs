//! 活动日志索引
//!
//! 浏览计数与分析都按 (activity_type, level) 过滤后再匹配 payload

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activities_type_level")
                    .table(Activities::Table)
                    .col(Activities::ActivityType)
                    .col(Activities::Level)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activities_created_at")
                    .table(Activities::Table)
                    .col(Activities::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_activities_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_activities_type_level").to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Activities {
    #[sea_orm(iden = "activities")]
    Table,
    ActivityType,
    Level,
    CreatedAt,
}
