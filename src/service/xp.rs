//! Message XP and levels.
//!
//! Every guild message may earn XP, at most once per cooldown. Crossing a level
//! threshold is announced in the channel and, for linked users, rewarded with
//! points.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::{
    data::user_xp::UserXpRepository,
    error::AppError,
    model::{
        ledger::{DiscordReward, PointsMetadata},
        xp::level_for_xp,
    },
    service::ledger::RewardLedgerService,
    state::AppState,
};

/// XP granted for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAward {
    pub gained: i64,
    pub total: i64,
    pub level: i32,
    pub leveled_up: bool,
}

pub struct XpService<'a> {
    state: &'a AppState,
}

impl<'a> XpService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Awards a random amount of XP for a message if the author is off cooldown.
    ///
    /// # Returns
    /// - `Ok(Some(XpAward))` - XP was granted
    /// - `Ok(None)` - The author is still on cooldown
    pub async fn award_message_xp(
        &self,
        user_id: u64,
        channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<XpAward>, AppError> {
        let settings = self.state.config.current()?;
        let gain = rand::rng().random_range(settings.xp.min_gain..=settings.xp.max_gain);

        self.apply_gain(user_id, channel_id, gain, now).await
    }

    /// Applies a fixed `gain`, honouring the cooldown.
    pub async fn apply_gain(
        &self,
        user_id: u64,
        channel_id: u64,
        gain: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<XpAward>, AppError> {
        let settings = self.state.config.current()?;
        let repo = UserXpRepository::new(&self.state.db);

        let current = repo.find_by_discord_id(user_id).await?;
        if let Some(current) = &current {
            if now - current.last_awarded_at < Duration::seconds(settings.xp.cooldown_secs) {
                return Ok(None);
            }
        }

        let (previous_xp, previous_level) = current.map(|c| (c.xp, c.level)).unwrap_or((0, 0));
        let total = previous_xp + gain;
        let level = level_for_xp(total);
        repo.upsert(user_id, total, level, now).await?;

        let leveled_up = level > previous_level;
        if leveled_up {
            self.level_up(user_id, channel_id, level, settings.xp.level_reward)
                .await;
        }

        Ok(Some(XpAward {
            gained: gain,
            total,
            level,
            leveled_up,
        }))
    }

    async fn level_up(&self, user_id: u64, channel_id: u64, level: i32, reward: i64) {
        tracing::info!("User {} reached level {}", user_id, level);

        let announcement = format!("🎉 <@{}> reached level **{}**!", user_id, level);
        if let Err(e) = self
            .state
            .gateway
            .send_message(channel_id, &announcement)
            .await
        {
            tracing::warn!("Failed to announce level up for {}: {}", user_id, e);
        }

        if reward <= 0 {
            return;
        }

        let ledger = RewardLedgerService::new(&self.state.db, &self.state.mint_queue);
        let metadata = PointsMetadata::new("Level Up", format!("Reached level {}", level));
        match ledger.reward_discord_user(user_id, reward, metadata).await {
            Ok(DiscordReward::Awarded(_)) | Ok(DiscordReward::NotLinked) => {}
            Err(e) => tracing::error!("Failed to award level up points to {}: {}", user_id, e),
        }
    }
}
