//! Per-type collector behaviour.
//!
//! The approval/reward state machine is shared; what differs between submission
//! types is what happens when a moderator approves and when a reaction is rewarded.

pub mod good_acts;
pub mod kind_words;

use serenity::async_trait;

use crate::{
    error::AppError,
    model::{
        reaction_collector::{CollectorRecord, CollectorType},
        settings::{BotSettings, CollectorSettings, DecisionEmoji},
    },
    state::AppState,
};

pub use self::{good_acts::GoodActsPolicy, kind_words::KindWordsPolicy};

#[async_trait]
pub trait CollectorPolicy: Send + Sync {
    fn collector_type(&self) -> CollectorType;

    /// Tunables for this collector type.
    fn settings<'s>(&self, settings: &'s BotSettings) -> &'s CollectorSettings {
        settings.collector(self.collector_type())
    }

    /// Runs after a moderator approval has been persisted.
    ///
    /// # Arguments
    /// - `record` - The approved record
    /// - `approver_id` - Moderator who approved
    /// - `approval` - Emoji the moderator approved with
    async fn approve_submission(
        &self,
        state: &AppState,
        settings: &BotSettings,
        record: &CollectorRecord,
        approver_id: u64,
        approval: &DecisionEmoji,
    ) -> Result<(), AppError>;

    /// Runs after a reactor's receipt has been stored in the reward window.
    async fn reaction_received(
        &self,
        state: &AppState,
        settings: &BotSettings,
        record: &CollectorRecord,
        reactor_id: u64,
    ) -> Result<(), AppError>;
}

/// Selects the policy for a record's type tag.
pub fn policy_for(collector_type: CollectorType) -> Box<dyn CollectorPolicy> {
    match collector_type {
        CollectorType::GoodActs => Box::new(GoodActsPolicy),
        CollectorType::KindWords => Box::new(KindWordsPolicy),
    }
}
