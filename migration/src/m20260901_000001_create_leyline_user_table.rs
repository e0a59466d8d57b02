use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeylineUser::Table)
                    .if_not_exists()
                    .col(string(LeylineUser::Uid).primary_key())
                    .col(string(LeylineUser::DiscordId).unique_key())
                    .col(string(LeylineUser::Username))
                    .col(big_integer(LeylineUser::TotalPoints).default(0))
                    .col(
                        timestamp(LeylineUser::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeylineUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LeylineUser {
    Table,
    Uid,
    DiscordId,
    Username,
    TotalPoints,
    CreatedAt,
}
