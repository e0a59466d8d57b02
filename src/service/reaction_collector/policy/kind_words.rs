//! Kind Words: text submissions recognizing someone's kindness.

use serenity::async_trait;

use crate::{
    error::AppError,
    model::{
        ledger::PointsMetadata,
        reaction_collector::{CollectorRecord, CollectorType},
        settings::{BotSettings, DecisionEmoji},
    },
    service::reaction_collector::{policy::CollectorPolicy, rewards::reward_member},
    state::AppState,
};

const THREAD_NAME: &str = "Kind words";

pub struct KindWordsPolicy;

#[async_trait]
impl CollectorPolicy for KindWordsPolicy {
    fn collector_type(&self) -> CollectorType {
        CollectorType::KindWords
    }

    async fn approve_submission(
        &self,
        state: &AppState,
        settings: &BotSettings,
        record: &CollectorRecord,
        approver_id: u64,
        _approval: &DecisionEmoji,
    ) -> Result<(), AppError> {
        let collector = self.settings(settings);

        let announcement = format!(
            "💬 <@{}>'s kind words were approved by <@{}>! React within the next {} hours to earn {} LLP.",
            record.author_id, approver_id, collector.reward_window_hours, collector.reaction_reward
        );
        if let Err(e) = state
            .gateway
            .send_message(record.channel_id, &announcement)
            .await
        {
            tracing::warn!(
                "Failed to announce approval of kind words {}: {}",
                record.message_id,
                e
            );
        }

        reward_member(
            state,
            record.author_id,
            collector.approval_reward,
            PointsMetadata::new("Kind Words", "Kind words approved").for_message(record.message_id),
            record.channel_id,
            true,
        )
        .await;

        if collector.create_thread {
            state
                .gateway
                .create_thread(record.channel_id, record.message_id, THREAD_NAME)
                .await?;
        }

        Ok(())
    }

    async fn reaction_received(
        &self,
        _state: &AppState,
        _settings: &BotSettings,
        record: &CollectorRecord,
        reactor_id: u64,
    ) -> Result<(), AppError> {
        tracing::debug!(
            "Kind words {} received reaction from {}",
            record.message_id,
            reactor_id
        );
        Ok(())
    }
}
