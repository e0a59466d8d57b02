//! Good Acts: media submissions of good deeds, categorized by the approval emoji.

use serenity::async_trait;

use crate::{
    error::AppError,
    model::{
        ledger::PointsMetadata,
        reaction_collector::{CollectorRecord, CollectorType},
        settings::{BotSettings, DecisionEmoji},
    },
    service::{
        ledger::RewardLedgerService, reaction_collector::policy::CollectorPolicy,
        reaction_collector::rewards::reward_member,
    },
    state::AppState,
};

const DEFAULT_CATEGORY: &str = "Good Act";

pub struct GoodActsPolicy;

#[async_trait]
impl CollectorPolicy for GoodActsPolicy {
    fn collector_type(&self) -> CollectorType {
        CollectorType::GoodActs
    }

    /// Announces the category, rewards the author and grants the configured item.
    async fn approve_submission(
        &self,
        state: &AppState,
        settings: &BotSettings,
        record: &CollectorRecord,
        approver_id: u64,
        approval: &DecisionEmoji,
    ) -> Result<(), AppError> {
        let collector = self.settings(settings);
        let category = approval.keyword.as_deref().unwrap_or(DEFAULT_CATEGORY);

        let announcement = format!(
            "{} <@{}>'s good act was approved by <@{}> as **{}**! React within the next {} hours to show some love; everyone who reacts earns {} LLP.",
            approval.emoji,
            record.author_id,
            approver_id,
            category,
            collector.reward_window_hours,
            collector.reaction_reward
        );
        if let Err(e) = state
            .gateway
            .send_message(record.channel_id, &announcement)
            .await
        {
            tracing::warn!(
                "Failed to announce approval of good act {}: {}",
                record.message_id,
                e
            );
        }

        reward_member(
            state,
            record.author_id,
            collector.approval_reward,
            PointsMetadata::new("Good Acts", format!("Good act approved ({})", category))
                .for_message(record.message_id),
            record.channel_id,
            true,
        )
        .await;

        if let Some(item_id) = collector.approval_nft_item {
            let ledger = RewardLedgerService::new(&state.db, &state.mint_queue);
            if let Some(uid) = ledger.get_leyline_uid(record.author_id).await? {
                if !ledger.reward_nft(&uid, item_id).await? {
                    tracing::warn!(
                        "Item {} granted to {} for good act {} but not queued for minting",
                        item_id,
                        uid,
                        record.message_id
                    );
                }
            }
        }

        Ok(())
    }

    /// Every rewarded reaction also earns the author the reaction reward.
    async fn reaction_received(
        &self,
        state: &AppState,
        settings: &BotSettings,
        record: &CollectorRecord,
        reactor_id: u64,
    ) -> Result<(), AppError> {
        let collector = self.settings(settings);
        reward_member(
            state,
            record.author_id,
            collector.reaction_reward,
            PointsMetadata::new(
                "Good Acts",
                format!("Reaction from <@{}> on your good act", reactor_id),
            )
            .for_message(record.message_id),
            record.channel_id,
            false,
        )
        .await;

        Ok(())
    }
}
