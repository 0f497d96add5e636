//! Create `messages` table.
//! Media lists are JSON arrays so the same schema works on Postgres and SQLite.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(uuid(Messages::Id).primary_key())
                    .col(string_len(Messages::Name, 256).not_null())
                    .col(text(Messages::Text).not_null())
                    .col(json(Messages::Images).not_null())
                    .col(json(Messages::Videos).not_null())
                    .col(string_len(Messages::Color, 64).not_null())
                    .col(double(Messages::Rotation).not_null())
                    .col(timestamp_with_time_zone(Messages::Timestamp).not_null())
                    .to_owned(),
            )
            .await?;

        // default listing is ORDER BY timestamp
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_timestamp")
                    .table(Messages::Table)
                    .col(Messages::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Messages::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    Name,
    Text,
    Images,
    Videos,
    Color,
    Rotation,
    Timestamp,
}
