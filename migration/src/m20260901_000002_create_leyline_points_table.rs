use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000001_create_leyline_user_table::LeylineUser;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeylinePoints::Table)
                    .if_not_exists()
                    .col(pk_auto(LeylinePoints::Id))
                    .col(string(LeylinePoints::Uid))
                    .col(big_integer(LeylinePoints::LeylinePoints))
                    .col(timestamp(LeylinePoints::Created).not_null())
                    .col(json(LeylinePoints::Metadata))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leyline_points_uid")
                            .from(LeylinePoints::Table, LeylinePoints::Uid)
                            .to(LeylineUser::Table, LeylineUser::Uid)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leyline_points_uid")
                    .table(LeylinePoints::Table)
                    .col(LeylinePoints::Uid)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_leyline_points_uid")
                    .table(LeylinePoints::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LeylinePoints::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LeylinePoints {
    Table,
    Id,
    Uid,
    LeylinePoints,
    Created,
    Metadata,
}
