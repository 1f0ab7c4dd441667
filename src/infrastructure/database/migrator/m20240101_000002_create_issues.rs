//! Create issues table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // created_by / updated_by are plain references, not foreign keys:
        // removing a user must not cascade to (or be blocked by) their issues.
        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Issues::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Issues::Title).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Issues::Status)
                            .string_len(20)
                            .not_null()
                            .default("new"),
                    )
                    .col(ColumnDef::new(Issues::Description).text())
                    .col(ColumnDef::new(Issues::ImageUrl).string_len(500))
                    .col(ColumnDef::new(Issues::Latitude).double().not_null())
                    .col(ColumnDef::new(Issues::Longitude).double().not_null())
                    .col(ColumnDef::new(Issues::Tags).json().not_null())
                    .col(ColumnDef::new(Issues::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Issues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Issues::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Issues::UpdatedBy).string())
                    .col(
                        ColumnDef::new(Issues::Revision)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Per-user lookups and the issue-count aggregation
        manager
            .create_index(
                Index::create()
                    .name("idx_issues_created_by")
                    .table(Issues::Table)
                    .col(Issues::CreatedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issues_status")
                    .table(Issues::Table)
                    .col(Issues::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issues_created_at")
                    .table(Issues::Table)
                    .col(Issues::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Issues::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Issues {
    Table,
    Id,
    Title,
    Status,
    Description,
    ImageUrl,
    Latitude,
    Longitude,
    Tags,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    UpdatedBy,
    Revision,
}
