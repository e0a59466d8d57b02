use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildEvent::Id))
                    .col(string(GuildEvent::Name))
                    .col(string(GuildEvent::ChannelId))
                    .col(string_null(GuildEvent::MessageId))
                    .col(big_integer(GuildEvent::Points))
                    .col(integer_null(GuildEvent::MaxClaims))
                    .col(timestamp(GuildEvent::Expires).not_null())
                    .col(string(GuildEvent::CreatedBy))
                    .col(
                        timestamp(GuildEvent::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GuildEventClaim::Table)
                    .if_not_exists()
                    .col(integer(GuildEventClaim::EventId))
                    .col(string(GuildEventClaim::DiscordId))
                    .col(timestamp(GuildEventClaim::ClaimedAt).not_null())
                    .primary_key(
                        Index::create()
                            .col(GuildEventClaim::EventId)
                            .col(GuildEventClaim::DiscordId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guild_event_claim_event_id")
                            .from(GuildEventClaim::Table, GuildEventClaim::EventId)
                            .to(GuildEvent::Table, GuildEvent::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildEventClaim::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GuildEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildEvent {
    Table,
    Id,
    Name,
    ChannelId,
    MessageId,
    Points,
    MaxClaims,
    Expires,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum GuildEventClaim {
    Table,
    EventId,
    DiscordId,
    ClaimedAt,
}
