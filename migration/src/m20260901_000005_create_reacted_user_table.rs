use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000004_create_reaction_collector_table::ReactionCollector;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReactedUser::Table)
                    .if_not_exists()
                    .col(string(ReactedUser::MessageId))
                    .col(string(ReactedUser::UserId))
                    .col(boolean(ReactedUser::Reacted).default(true))
                    .col(timestamp(ReactedUser::Timestamp).not_null())
                    .primary_key(
                        Index::create()
                            .col(ReactedUser::MessageId)
                            .col(ReactedUser::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reacted_user_message_id")
                            .from(ReactedUser::Table, ReactedUser::MessageId)
                            .to(ReactionCollector::Table, ReactionCollector::MessageId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReactedUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReactedUser {
    Table,
    MessageId,
    UserId,
    Reacted,
    Timestamp,
}
