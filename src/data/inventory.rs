//! Inventory repository (`inventory_item`), the per-account item counts.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

pub struct InventoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Increments the count of `item_id` held by `uid`, creating the row if needed.
    ///
    /// # Returns
    /// - `Ok(i32)` - The new count
    /// - `Err(DbErr)` - Database error
    pub async fn increment(&self, uid: &str, item_id: i32) -> Result<i32, DbErr> {
        let now = Utc::now();
        let existing = entity::prelude::InventoryItem::find_by_id((uid.to_string(), item_id))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let count = existing.count + 1;
                let mut active: entity::inventory_item::ActiveModel = existing.into();
                active.count = ActiveValue::Set(count);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::inventory_item::ActiveModel {
                    uid: ActiveValue::Set(uid.to_string()),
                    item_id: ActiveValue::Set(item_id),
                    count: ActiveValue::Set(1),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(entity.count)
    }

    pub async fn count(&self, uid: &str, item_id: i32) -> Result<i32, DbErr> {
        Ok(
            entity::prelude::InventoryItem::find_by_id((uid.to_string(), item_id))
                .one(self.db)
                .await?
                .map(|item| item.count)
                .unwrap_or(0),
        )
    }
}
