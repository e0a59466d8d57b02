//! Live-tunable bot settings.
//!
//! Stored as a single JSON document in the `bot_config` table and mirrored in
//! memory by [`crate::service::config_cache::ConfigCache`], so operators can change
//! windows, rewards and emoji without a redeploy.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::config::ConfigError, model::reaction_collector::CollectorType};

/// Key of the single settings document.
pub const SETTINGS_KEY: &str = "bot";

/// Longest approval or reward window an operator may configure: one year.
pub const MAX_WINDOW_HOURS: u32 = 24 * 365;

/// One moderator-decision emoji, optionally carrying a category keyword that is
/// attached to the collector when a moderator approves with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEmoji {
    pub emoji: String,
    #[serde(default)]
    pub keyword: Option<String>,
}

impl DecisionEmoji {
    pub fn new(emoji: &str, keyword: Option<&str>) -> Self {
        Self {
            emoji: emoji.to_string(),
            keyword: keyword.map(str::to_string),
        }
    }
}

/// Per-collector-type tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorSettings {
    /// Channels whose submissions start a collector of this type.
    #[serde(default)]
    pub channel_ids: Vec<u64>,
    pub approval_window_hours: u32,
    pub reward_window_hours: u32,
    /// Points awarded to the author when a moderator approves.
    pub approval_reward: i64,
    /// Points awarded per qualifying reaction during the reward window.
    pub reaction_reward: i64,
    /// Ordered decision emoji the bot seeds onto the message.
    pub decision_emoji: Vec<DecisionEmoji>,
    pub reject_emoji: String,
    /// Inventory item granted to the author on approval.
    #[serde(default)]
    pub approval_nft_item: Option<i32>,
    /// Open a discussion thread on the submission when approved.
    #[serde(default)]
    pub create_thread: bool,
}

impl CollectorSettings {
    /// When an approval window opened at `from` closes.
    pub fn approval_deadline(&self, from: DateTime<Utc>) -> Result<DateTime<Utc>, ConfigError> {
        window_end(from, self.approval_window_hours)
    }

    /// When a reward window opened at `from` closes.
    pub fn reward_deadline(&self, from: DateTime<Utc>) -> Result<DateTime<Utc>, ConfigError> {
        window_end(from, self.reward_window_hours)
    }

    /// Every emoji the bot reacts with, in order, reject emoji last if not listed.
    pub fn seeded_emoji(&self) -> Vec<&str> {
        let mut emoji: Vec<&str> = self.decision_emoji.iter().map(|d| d.emoji.as_str()).collect();
        if !emoji.contains(&self.reject_emoji.as_str()) {
            emoji.push(self.reject_emoji.as_str());
        }
        emoji
    }

    pub fn is_decision_emoji(&self, emoji: &str) -> bool {
        emoji == self.reject_emoji || self.decision_emoji.iter().any(|d| d.emoji == emoji)
    }

    /// Returns the approval entry for `emoji`; the reject emoji never approves.
    pub fn approval_emoji(&self, emoji: &str) -> Option<&DecisionEmoji> {
        if emoji == self.reject_emoji {
            return None;
        }
        self.decision_emoji.iter().find(|d| d.emoji == emoji)
    }

    pub fn validate(&self, name: &str) -> Result<(), String> {
        if self.approval_window_hours == 0 || self.reward_window_hours == 0 {
            return Err(format!("{name}: windows must be at least one hour"));
        }
        if self.approval_window_hours > MAX_WINDOW_HOURS
            || self.reward_window_hours > MAX_WINDOW_HOURS
        {
            return Err(format!("{name}: windows cannot exceed {MAX_WINDOW_HOURS} hours"));
        }
        if self.approval_reward < 0 || self.reaction_reward < 0 {
            return Err(format!("{name}: rewards cannot be negative"));
        }
        if self.reject_emoji.is_empty() {
            return Err(format!("{name}: reject emoji is required"));
        }
        if !self
            .decision_emoji
            .iter()
            .any(|d| d.emoji != self.reject_emoji)
        {
            return Err(format!("{name}: at least one approval emoji is required"));
        }
        Ok(())
    }
}

fn window_end(from: DateTime<Utc>, hours: u32) -> Result<DateTime<Utc>, ConfigError> {
    Duration::try_hours(i64::from(hours))
        .and_then(|window| from.checked_add_signed(window))
        .ok_or_else(|| ConfigError::InvalidSettings(format!("{hours}-hour window is out of range")))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpSettings {
    pub cooldown_secs: i64,
    pub min_gain: i64,
    pub max_gain: i64,
    /// Points awarded to linked users on each level-up; zero disables.
    #[serde(default)]
    pub level_reward: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotSettings {
    /// Holding any of these roles grants the moderator capability.
    pub moderator_role_ids: Vec<u64>,
    #[serde(default)]
    pub mute_role_id: Option<u64>,
    /// Where unlinked users are sent to connect their account.
    pub connect_url: String,
    pub good_acts: CollectorSettings,
    pub kind_words: CollectorSettings,
    pub xp: XpSettings,
}

impl BotSettings {
    pub fn collector(&self, collector_type: CollectorType) -> &CollectorSettings {
        match collector_type {
            CollectorType::GoodActs => &self.good_acts,
            CollectorType::KindWords => &self.kind_words,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.good_acts.validate("good_acts")?;
        self.kind_words.validate("kind_words")?;
        if self.xp.min_gain < 0 || self.xp.min_gain > self.xp.max_gain {
            return Err("xp: min_gain must be between 0 and max_gain".to_string());
        }
        if self.xp.cooldown_secs < 0 {
            return Err("xp: cooldown cannot be negative".to_string());
        }
        Ok(())
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            moderator_role_ids: Vec::new(),
            mute_role_id: None,
            connect_url: "https://leyline.gg/connect".to_string(),
            good_acts: CollectorSettings {
                channel_ids: Vec::new(),
                approval_window_hours: 168,
                reward_window_hours: 24,
                approval_reward: 100,
                reaction_reward: 5,
                decision_emoji: vec![
                    DecisionEmoji::new("🌱", Some("Environment")),
                    DecisionEmoji::new("🤝", Some("Community")),
                    DecisionEmoji::new("🐾", Some("Animals")),
                    DecisionEmoji::new("💖", Some("Kindness")),
                    DecisionEmoji::new("❌", None),
                ],
                reject_emoji: "❌".to_string(),
                approval_nft_item: None,
                create_thread: false,
            },
            kind_words: CollectorSettings {
                channel_ids: Vec::new(),
                approval_window_hours: 168,
                reward_window_hours: 24,
                approval_reward: 25,
                reaction_reward: 2,
                decision_emoji: vec![
                    DecisionEmoji::new("✅", None),
                    DecisionEmoji::new("❌", None),
                ],
                reject_emoji: "❌".to_string(),
                approval_nft_item: None,
                create_thread: true,
            },
            xp: XpSettings {
                cooldown_secs: 60,
                min_gain: 15,
                max_gain: 25,
                level_reward: 10,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(BotSettings::default().validate().is_ok());
    }

    #[test]
    fn reject_emoji_never_approves() {
        let settings = BotSettings::default();
        assert!(settings.good_acts.approval_emoji("❌").is_none());
        assert_eq!(
            settings
                .good_acts
                .approval_emoji("🌱")
                .and_then(|d| d.keyword.as_deref()),
            Some("Environment")
        );
        assert!(settings.good_acts.is_decision_emoji("❌"));
        assert!(!settings.good_acts.is_decision_emoji("🔥"));
    }

    #[test]
    fn seeded_emoji_appends_missing_reject() {
        let mut settings = BotSettings::default().kind_words;
        settings.decision_emoji.retain(|d| d.emoji != "❌");
        assert_eq!(settings.seeded_emoji(), vec!["✅", "❌"]);
    }

    #[test]
    fn rejects_settings_without_approval_emoji() {
        let mut settings = BotSettings::default();
        settings.kind_words.decision_emoji = vec![DecisionEmoji::new("❌", None)];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_windows_longer_than_a_year() {
        let mut settings = BotSettings::default();
        settings.good_acts.approval_window_hours = u32::MAX;
        assert!(settings.validate().is_err());

        let mut settings = BotSettings::default();
        settings.kind_words.reward_window_hours = MAX_WINDOW_HOURS + 1;
        assert!(settings.validate().is_err());

        let mut settings = BotSettings::default();
        settings.good_acts.reward_window_hours = MAX_WINDOW_HOURS;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn deadline_reports_overflow_instead_of_panicking() {
        let mut collector = BotSettings::default().good_acts;
        collector.approval_window_hours = u32::MAX;
        collector.reward_window_hours = 2;
        let now = Utc::now();

        assert!(matches!(
            collector.approval_deadline(now),
            Err(ConfigError::InvalidSettings(_))
        ));
        assert!(collector.reward_deadline(DateTime::<Utc>::MAX_UTC).is_err());
        assert_eq!(collector.reward_deadline(now).unwrap(), now + Duration::hours(2));
    }

    #[test]
    fn parses_partial_document_with_defaults() {
        let json = serde_json::json!({
            "moderator_role_ids": [1],
            "connect_url": "https://example.test",
            "good_acts": {
                "approval_window_hours": 1,
                "reward_window_hours": 2,
                "approval_reward": 3,
                "reaction_reward": 4,
                "decision_emoji": [{"emoji": "👍"}],
                "reject_emoji": "👎"
            },
            "kind_words": {
                "approval_window_hours": 1,
                "reward_window_hours": 2,
                "approval_reward": 3,
                "reaction_reward": 4,
                "decision_emoji": [{"emoji": "👍", "keyword": "Nice"}],
                "reject_emoji": "👎"
            },
            "xp": {"cooldown_secs": 0, "min_gain": 1, "max_gain": 1}
        });

        let settings: BotSettings = serde_json::from_value(json).unwrap();
        assert!(settings.good_acts.channel_ids.is_empty());
        assert!(!settings.good_acts.create_thread);
        assert_eq!(settings.xp.level_reward, 0);
        assert_eq!(settings.good_acts.seeded_emoji(), vec!["👍", "👎"]);
    }
}
