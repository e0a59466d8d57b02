use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Punishment::Table)
                    .if_not_exists()
                    .col(pk_auto(Punishment::Id))
                    .col(string(Punishment::DiscordId))
                    .col(string(Punishment::Kind))
                    .col(string(Punishment::Reason))
                    .col(string(Punishment::IssuedBy))
                    .col(timestamp(Punishment::IssuedAt).not_null())
                    .col(timestamp_null(Punishment::ExpiresAt))
                    .col(boolean(Punishment::Reversed).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_punishment_discord_id")
                    .table(Punishment::Table)
                    .col(Punishment::DiscordId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_punishment_discord_id")
                    .table(Punishment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Punishment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Punishment {
    Table,
    Id,
    DiscordId,
    Kind,
    Reason,
    IssuedBy,
    IssuedAt,
    ExpiresAt,
    Reversed,
}
