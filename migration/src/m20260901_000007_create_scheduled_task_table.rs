use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduledTask::Table)
                    .if_not_exists()
                    .col(pk_auto(ScheduledTask::Id))
                    .col(string(ScheduledTask::Kind))
                    .col(json(ScheduledTask::Payload))
                    .col(timestamp(ScheduledTask::DueAt).not_null())
                    .col(timestamp_null(ScheduledTask::CompletedAt))
                    .col(
                        timestamp(ScheduledTask::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scheduled_task_due_at")
                    .table(ScheduledTask::Table)
                    .col(ScheduledTask::DueAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_scheduled_task_due_at")
                    .table(ScheduledTask::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ScheduledTask::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScheduledTask {
    Table,
    Id,
    Kind,
    Payload,
    DueAt,
    CompletedAt,
    CreatedAt,
}
