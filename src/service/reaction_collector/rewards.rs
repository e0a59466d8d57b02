//! Point awards made on behalf of a collector.

use crate::{
    model::{
        ledger::{DiscordReward, PointsMetadata},
        reaction_collector::RewardOutcome,
    },
    service::{
        ledger::RewardLedgerService,
        notify::{notify_user, unlinked_message},
    },
    state::AppState,
};

/// Awards `amount` to a Discord user, telling unlinked users how to link.
///
/// Ledger failures are logged and reported as [`RewardOutcome::Failed`]; they
/// never abort the collector.
///
/// # Arguments
/// - `user_id` - Discord user to credit
/// - `metadata` - Ledger entry metadata
/// - `channel_id` - Where to mention the user if they cannot be DMed
/// - `notify_unlinked` - Whether an unlinked user should be told how to link
pub async fn reward_member(
    state: &AppState,
    user_id: u64,
    amount: i64,
    metadata: PointsMetadata,
    channel_id: u64,
    notify_unlinked: bool,
) -> RewardOutcome {
    let reason = metadata.comment.to_lowercase();
    let ledger = RewardLedgerService::new(&state.db, &state.mint_queue);

    match ledger.reward_discord_user(user_id, amount, metadata).await {
        Ok(DiscordReward::Awarded(_)) => RewardOutcome::Rewarded,
        Ok(DiscordReward::NotLinked) => {
            tracing::debug!("User {} is not linked; no points awarded", user_id);
            if notify_unlinked {
                let connect_url = match state.config.current() {
                    Ok(settings) => settings.connect_url.clone(),
                    Err(e) => {
                        tracing::error!("Cannot build link notice for {}: {}", user_id, e);
                        return RewardOutcome::NotLinked;
                    }
                };
                notify_user(
                    state.gateway.as_ref(),
                    user_id,
                    Some(channel_id),
                    &unlinked_message(&connect_url, &reason),
                )
                .await;
            }
            RewardOutcome::NotLinked
        }
        Err(e) => {
            tracing::error!("Failed to award {} LLP to user {}: {}", amount, user_id, e);
            RewardOutcome::Failed
        }
    }
}
