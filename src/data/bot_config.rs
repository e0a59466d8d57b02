//! Settings document repository (`bot_config`).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{error::AppError, model::settings::BotSettings};

pub struct BotConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BotConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the stored settings document and when it was last written.
    ///
    /// # Returns
    /// - `Ok(Some((settings, updated_at)))` - Document found and parsed
    /// - `Ok(None)` - No document stored under `key`
    /// - `Err(AppError::SerdeErr)` - Document exists but does not parse
    pub async fn get(&self, key: &str) -> Result<Option<(BotSettings, DateTime<Utc>)>, AppError> {
        let Some(entity) = entity::prelude::BotConfig::find_by_id(key.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let settings = serde_json::from_value(entity.body)?;
        Ok(Some((settings, entity.updated_at)))
    }

    /// Gets only the last write time, used to detect out-of-band edits cheaply.
    pub async fn get_updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, AppError> {
        Ok(entity::prelude::BotConfig::find_by_id(key.to_string())
            .one(self.db)
            .await?
            .map(|entity| entity.updated_at))
    }

    /// Creates or replaces the settings document.
    ///
    /// # Returns
    /// - `Ok(DateTime<Utc>)` - The new `updated_at`
    /// - `Err(AppError)` - Database or serialization error
    pub async fn upsert(
        &self,
        key: &str,
        settings: &BotSettings,
    ) -> Result<DateTime<Utc>, AppError> {
        let now = Utc::now();
        let body = serde_json::to_value(settings)?;

        let existing = entity::prelude::BotConfig::find_by_id(key.to_string())
            .one(self.db)
            .await?;

        match existing {
            Some(existing) => {
                let mut active: entity::bot_config::ActiveModel = existing.into();
                active.body = ActiveValue::Set(body);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?;
            }
            None => {
                entity::bot_config::ActiveModel {
                    key: ActiveValue::Set(key.to_string()),
                    body: ActiveValue::Set(body),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(now)
    }
}
