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
                    .table(InventoryItem::Table)
                    .if_not_exists()
                    .col(string(InventoryItem::Uid))
                    .col(integer(InventoryItem::ItemId))
                    .col(integer(InventoryItem::Count).default(0))
                    .col(timestamp(InventoryItem::UpdatedAt).not_null())
                    .primary_key(
                        Index::create()
                            .col(InventoryItem::Uid)
                            .col(InventoryItem::ItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_item_uid")
                            .from(InventoryItem::Table, InventoryItem::Uid)
                            .to(LeylineUser::Table, LeylineUser::Uid)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InventoryItem {
    Table,
    Uid,
    ItemId,
    Count,
    UpdatedAt,
}
