//! XP repository (`user_xp`).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{error::AppError, model::xp::UserXp};

pub struct UserXpRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserXpRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<UserXp>, AppError> {
        entity::prelude::UserXp::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?
            .map(UserXp::from_entity)
            .transpose()
    }

    /// Writes the XP totals for a user, creating the row on first award.
    pub async fn upsert(
        &self,
        discord_id: u64,
        xp: i64,
        level: i32,
        awarded_at: DateTime<Utc>,
    ) -> Result<UserXp, AppError> {
        let existing = entity::prelude::UserXp::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let mut active: entity::user_xp::ActiveModel = existing.into();
                active.xp = ActiveValue::Set(xp);
                active.level = ActiveValue::Set(level);
                active.last_awarded_at = ActiveValue::Set(awarded_at);
                active.update(self.db).await?
            }
            None => {
                entity::user_xp::ActiveModel {
                    discord_id: ActiveValue::Set(discord_id.to_string()),
                    xp: ActiveValue::Set(xp),
                    level: ActiveValue::Set(level),
                    last_awarded_at: ActiveValue::Set(awarded_at),
                }
                .insert(self.db)
                .await?
            }
        };

        UserXp::from_entity(entity)
    }
}
