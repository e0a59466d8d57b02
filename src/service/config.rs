//! Bot settings service.
//!
//! Owns reads and writes of the settings document. Every write made through this
//! service is published to the change feed; edits made directly in the store are
//! detected by [`ConfigService::poll_external_edit`] from the scheduler.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::bot_config::BotConfigRepository,
    error::{config::ConfigError, AppError},
    feed::{ChangeFeed, ChangeKind, DocumentChange},
    model::settings::{BotSettings, SETTINGS_KEY},
    service::config_cache::BOT_CONFIG_COLLECTION,
};

pub struct ConfigService<'a> {
    db: &'a DatabaseConnection,
    feed: &'a ChangeFeed,
}

impl<'a> ConfigService<'a> {
    pub fn new(db: &'a DatabaseConnection, feed: &'a ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// Loads the settings document, inserting the defaults on first boot.
    ///
    /// # Returns
    /// - `Ok((settings, updated_at))` - Stored or freshly inserted settings
    /// - `Err(AppError::ConfigErr)` - The stored document fails validation
    /// - `Err(AppError)` - Database error or unparsable document
    pub async fn load_or_init(&self) -> Result<(BotSettings, DateTime<Utc>), AppError> {
        let repo = BotConfigRepository::new(self.db);

        if let Some((settings, updated_at)) = repo.get(SETTINGS_KEY).await? {
            settings.validate().map_err(ConfigError::InvalidSettings)?;
            return Ok((settings, updated_at));
        }

        tracing::info!("No bot settings stored; inserting defaults");
        let settings = BotSettings::default();
        let updated_at = repo.upsert(SETTINGS_KEY, &settings).await?;
        self.publish(ChangeKind::Added, &settings)?;

        Ok((settings, updated_at))
    }

    pub async fn get(&self) -> Result<BotSettings, AppError> {
        BotConfigRepository::new(self.db)
            .get(SETTINGS_KEY)
            .await?
            .map(|(settings, _)| settings)
            .ok_or_else(|| AppError::NotFound("Bot settings not found".to_string()))
    }

    /// Validates and stores new settings, then publishes them.
    ///
    /// # Returns
    /// - `Ok(DateTime<Utc>)` - The new `updated_at`
    /// - `Err(AppError::BadRequest)` - Settings failed validation; nothing was written
    pub async fn update(&self, settings: &BotSettings) -> Result<DateTime<Utc>, AppError> {
        settings.validate().map_err(AppError::BadRequest)?;

        let updated_at = BotConfigRepository::new(self.db)
            .upsert(SETTINGS_KEY, settings)
            .await?;
        self.publish(ChangeKind::Modified, settings)?;

        tracing::info!("Bot settings updated");
        Ok(updated_at)
    }

    /// Publishes the stored document if it changed after `since`.
    ///
    /// # Returns
    /// - `Ok(Some(updated_at))` - An out-of-band edit was found and published
    /// - `Ok(None)` - Nothing changed
    pub async fn poll_external_edit(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, AppError> {
        let repo = BotConfigRepository::new(self.db);

        match repo.get_updated_at(SETTINGS_KEY).await? {
            Some(updated_at) if updated_at > since => {}
            _ => return Ok(None),
        }

        let Some((settings, updated_at)) = repo.get(SETTINGS_KEY).await? else {
            return Ok(None);
        };

        tracing::info!("Detected external bot settings edit");
        self.publish(ChangeKind::Modified, &settings)?;
        Ok(Some(updated_at))
    }

    fn publish(&self, kind: ChangeKind, settings: &BotSettings) -> Result<(), AppError> {
        self.feed.publish(DocumentChange::new(
            BOT_CONFIG_COLLECTION,
            SETTINGS_KEY,
            kind,
            Some(serde_json::to_value(settings)?),
        ));
        Ok(())
    }
}
