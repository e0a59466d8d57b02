//! In-memory mirror of the bot settings document.
//!
//! Readers call [`ConfigCache::current`] for the latest snapshot; it is replaced
//! whenever a valid change for the settings document arrives on the change feed.
//! A snapshot is never older than the last delivered change. Invalid documents are
//! logged and ignored, keeping the previous snapshot.

use futures::StreamExt;
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    error::{internal::InternalError, AppError},
    feed::{ChangeFeed, ChangeKind, DocumentChange},
    model::settings::{BotSettings, SETTINGS_KEY},
};

/// Collection name the settings document is published under.
pub const BOT_CONFIG_COLLECTION: &str = "bot_config";

#[derive(Clone)]
pub struct ConfigCache {
    tx: Arc<watch::Sender<Option<Arc<BotSettings>>>>,
}

impl ConfigCache {
    /// Creates an empty cache; readers block in [`ConfigCache::await_ready`] until a load.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Creates a cache that is ready with `settings`.
    pub fn with_settings(settings: BotSettings) -> Self {
        let cache = Self::new();
        cache.apply(settings);
        cache
    }

    /// Latest snapshot.
    ///
    /// # Returns
    /// - `Ok(Arc<BotSettings>)` - Current settings
    /// - `Err(AppError::InternalErr(SettingsNotLoaded))` - Nothing loaded yet
    pub fn current(&self) -> Result<Arc<BotSettings>, AppError> {
        self.tx
            .borrow()
            .clone()
            .ok_or_else(|| InternalError::SettingsNotLoaded.into())
    }

    /// Waits for the first successful load and returns that snapshot.
    pub async fn await_ready(&self) -> Result<Arc<BotSettings>, AppError> {
        let mut rx = self.tx.subscribe();
        let settings = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| InternalError::SettingsNotLoaded)?;

        settings
            .clone()
            .ok_or_else(|| InternalError::SettingsNotLoaded.into())
    }

    pub fn apply(&self, settings: BotSettings) {
        self.tx.send_replace(Some(Arc::new(settings)));
    }

    /// Applies a settings document delta.
    ///
    /// # Returns
    /// - `true` - The snapshot was replaced
    /// - `false` - The change was for another document, a removal, or invalid
    pub fn apply_change(&self, change: &DocumentChange) -> bool {
        if change.collection != BOT_CONFIG_COLLECTION || change.id != SETTINGS_KEY {
            return false;
        }

        if change.kind == ChangeKind::Removed {
            tracing::warn!("Bot settings document removed; keeping last known settings");
            return false;
        }

        let Some(data) = change.data.clone() else {
            return false;
        };

        let settings = match serde_json::from_value::<BotSettings>(data) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Ignoring unparsable bot settings update: {}", e);
                return false;
            }
        };

        if let Err(reason) = settings.validate() {
            tracing::error!("Ignoring invalid bot settings update: {}", reason);
            return false;
        }

        self.apply(settings);
        tracing::info!("Bot settings reloaded");
        true
    }

    /// Keeps the cache current from the change feed until the feed closes.
    pub fn spawn_listener(&self, feed: &ChangeFeed) -> JoinHandle<()> {
        let cache = self.clone();
        let mut changes = Box::pin(feed.subscribe(BOT_CONFIG_COLLECTION));

        tokio::spawn(async move {
            while let Some(change) = changes.next().await {
                cache.apply_change(&change);
            }
        })
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn change_with(settings: &BotSettings) -> DocumentChange {
        DocumentChange::new(
            BOT_CONFIG_COLLECTION,
            SETTINGS_KEY,
            ChangeKind::Modified,
            Some(serde_json::to_value(settings).unwrap()),
        )
    }

    #[test]
    fn current_fails_before_first_load() {
        let cache = ConfigCache::new();
        assert!(matches!(
            cache.current(),
            Err(AppError::InternalErr(InternalError::SettingsNotLoaded))
        ));
    }

    #[tokio::test]
    async fn await_ready_blocks_until_load() {
        let cache = ConfigCache::new();
        let waiter = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.await_ready().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        cache.apply(BotSettings::default());
        let settings = waiter.await.unwrap().unwrap();
        assert_eq!(*settings, BotSettings::default());
    }

    #[test]
    fn applies_valid_change() {
        let cache = ConfigCache::with_settings(BotSettings::default());
        let mut updated = BotSettings::default();
        updated.good_acts.reaction_reward = 42;

        assert!(cache.apply_change(&change_with(&updated)));
        assert_eq!(cache.current().unwrap().good_acts.reaction_reward, 42);
    }

    #[test]
    fn keeps_previous_snapshot_on_invalid_change() {
        let cache = ConfigCache::with_settings(BotSettings::default());
        let mut invalid = BotSettings::default();
        invalid.good_acts.approval_window_hours = 0;

        assert!(!cache.apply_change(&change_with(&invalid)));
        assert_eq!(*cache.current().unwrap(), BotSettings::default());
    }

    #[test]
    fn ignores_other_collections() {
        let cache = ConfigCache::with_settings(BotSettings::default());
        let change = DocumentChange::new(
            "reaction_collector",
            SETTINGS_KEY,
            ChangeKind::Modified,
            Some(serde_json::json!({})),
        );
        assert!(!cache.apply_change(&change));
    }

    #[tokio::test]
    async fn listener_follows_feed() {
        let feed = ChangeFeed::new();
        let cache = ConfigCache::with_settings(BotSettings::default());
        let _listener = cache.spawn_listener(&feed);

        let mut updated = BotSettings::default();
        updated.xp.cooldown_secs = 5;
        feed.publish(change_with(&updated));

        for _ in 0..50 {
            if cache.current().unwrap().xp.cooldown_secs == 5 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("cache never picked up the change");
    }
}
