//! Create users table

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
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string_len(20).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(20).not_null())
                    .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::Revision)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Two users cannot share both first and last name
        manager
            .create_index(
                Index::create()
                    .name("idx_users_full_name")
                    .table(Users::Table)
                    .col(Users::FirstName)
                    .col(Users::LastName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Listing sorts by last name
        manager
            .create_index(
                Index::create()
                    .name("idx_users_last_name")
                    .table(Users::Table)
                    .col(Users::LastName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Role,
    CreatedAt,
    Revision,
}
