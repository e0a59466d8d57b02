//! Factory for linked Leyline accounts.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating linked accounts with customizable fields.
pub struct LeylineUserFactory<'a> {
    db: &'a DatabaseConnection,
    uid: String,
    discord_id: String,
    username: String,
    total_points: i64,
}

impl<'a> LeylineUserFactory<'a> {
    /// Creates a new LeylineUserFactory with default values.
    ///
    /// Defaults:
    /// - uid: `"uid-{id}"`
    /// - discord_id: `"{id}"`
    /// - username: `"user{id}"`
    /// - total_points: `0`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            uid: format!("uid-{}", id),
            discord_id: id.to_string(),
            username: format!("user{}", id),
            total_points: 0,
        }
    }

    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    pub fn discord_id(mut self, discord_id: u64) -> Self {
        self.discord_id = discord_id.to_string();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn total_points(mut self, total_points: i64) -> Self {
        self.total_points = total_points;
        self
    }

    /// Builds and inserts the account.
    ///
    /// # Returns
    /// - `Ok(entity::leyline_user::Model)` - Created account
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::leyline_user::Model, DbErr> {
        entity::leyline_user::ActiveModel {
            uid: ActiveValue::Set(self.uid),
            discord_id: ActiveValue::Set(self.discord_id),
            username: ActiveValue::Set(self.username),
            total_points: ActiveValue::Set(self.total_points),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Links `discord_id` to a fresh account.
///
/// Shorthand for `LeylineUserFactory::new(db).discord_id(discord_id).build().await`.
pub async fn create_linked_user(
    db: &DatabaseConnection,
    discord_id: u64,
) -> Result<entity::leyline_user::Model, DbErr> {
    LeylineUserFactory::new(db).discord_id(discord_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_linked_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(LeylineUser).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let account = create_linked_user(db, 42).await?;

        assert_eq!(account.discord_id, "42");
        assert!(account.uid.starts_with("uid-"));
        assert_eq!(account.total_points, 0);

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_accounts() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(LeylineUser).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = LeylineUserFactory::new(db).build().await?;
        let second = LeylineUserFactory::new(db).build().await?;

        assert_ne!(first.uid, second.uid);
        assert_ne!(first.discord_id, second.discord_id);

        Ok(())
    }
}
