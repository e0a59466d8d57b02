use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReactionCollector::Table)
                    .if_not_exists()
                    .col(string(ReactionCollector::MessageId).primary_key())
                    .col(string(ReactionCollector::CollectorType))
                    .col(string(ReactionCollector::ChannelId))
                    .col(string(ReactionCollector::AuthorId))
                    .col(boolean(ReactionCollector::Approved).default(false))
                    .col(timestamp(ReactionCollector::Expires).not_null())
                    .col(string_null(ReactionCollector::ApprovedBy))
                    .col(timestamp_null(ReactionCollector::ApprovedOn))
                    .col(string_null(ReactionCollector::RejectedBy))
                    .col(json_null(ReactionCollector::Metadata))
                    .col(
                        timestamp(ReactionCollector::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Rehydration scans for unexpired collectors on every boot
        manager
            .create_index(
                Index::create()
                    .name("idx_reaction_collector_expires")
                    .table(ReactionCollector::Table)
                    .col(ReactionCollector::Expires)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reaction_collector_expires")
                    .table(ReactionCollector::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ReactionCollector::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReactionCollector {
    Table,
    MessageId,
    CollectorType,
    ChannelId,
    AuthorId,
    Approved,
    Expires,
    ApprovedBy,
    ApprovedOn,
    RejectedBy,
    Metadata,
    CreatedAt,
}
