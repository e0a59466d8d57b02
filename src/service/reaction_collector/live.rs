//! A collector bound to one submission message.
//!
//! The collector walks its record through the approval window (moderators decide
//! with the seeded emoji) and then the reward window (every qualifying reactor is
//! credited once). Decisions are persisted with conditional writes, and reward
//! receipts are claimed in the in-memory cache before the store so concurrent
//! reactions from the same user cannot both pass the dedupe check.

use chrono::Utc;
use futures::{Stream, StreamExt};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};
use tokio::sync::Mutex as AsyncMutex;

use crate::{
    data::reaction_collector::ReactionCollectorRepository,
    error::AppError,
    model::{
        ledger::PointsMetadata,
        reaction_collector::{
            ApproveCollectorParam, CollectorMetadata, CollectorRecord, CollectorState,
            PendingOutcome, ReactionEvent, RewardOutcome,
        },
        settings::{BotSettings, DecisionEmoji},
    },
    service::reaction_collector::{
        policy::{policy_for, CollectorPolicy},
        rewards::reward_member,
    },
    state::AppState,
};

pub struct LiveCollector {
    state: AppState,
    policy: Box<dyn CollectorPolicy>,
    message_id: u64,
    record: AsyncMutex<CollectorRecord>,
    /// Users already credited for this message.
    rewarded: Mutex<HashSet<u64>>,
}

impl LiveCollector {
    /// Creates a collector for `record` with the policy its type tag selects.
    ///
    /// # Arguments
    /// - `record` - The stored record, source of truth for state and expiry
    /// - `rewarded` - Users already holding a receipt for this message
    pub fn new(state: AppState, record: CollectorRecord, rewarded: HashSet<u64>) -> Self {
        Self {
            state,
            policy: policy_for(record.collector_type),
            message_id: record.message_id,
            record: AsyncMutex::new(record),
            rewarded: Mutex::new(rewarded),
        }
    }

    pub fn message_id(&self) -> u64 {
        self.message_id
    }

    pub async fn record(&self) -> CollectorRecord {
        self.record.lock().await.clone()
    }

    pub fn rewarded_users(&self) -> HashSet<u64> {
        self.rewarded_cache().clone()
    }

    /// Handles a reaction during the approval window.
    ///
    /// Only moderators decide. A non-moderator's reject reaction is removed so it
    /// cannot be mistaken for a decision; their approval emoji are left alone. The
    /// author can never decide on their own submission.
    ///
    /// # Returns
    /// - `Ok(PendingOutcome)` - What the reaction did
    /// - `Err(AppError)` - Settings not loaded, role lookup or store failure
    pub async fn handle_pending_reaction(
        &self,
        event: &ReactionEvent,
    ) -> Result<PendingOutcome, AppError> {
        let settings = self.state.config.current()?;
        let collector = self.policy.settings(&settings);
        let record = self.record().await;

        match record.state_at(Utc::now()) {
            CollectorState::PendingApproval => {}
            CollectorState::Closed => return Ok(PendingOutcome::Ignored),
            CollectorState::ApprovedOpen | CollectorState::Rejected => {
                return Ok(PendingOutcome::AlreadyDecided)
            }
        }

        if event.user_id == self.state.bot_user_id || !collector.is_decision_emoji(&event.emoji) {
            return Ok(PendingOutcome::Ignored);
        }

        let is_reject = event.emoji == collector.reject_emoji;

        if !self.is_moderator(&settings, event).await? {
            if !is_reject {
                return Ok(PendingOutcome::Ignored);
            }

            if let Err(e) = self
                .state
                .gateway
                .remove_reaction(event.channel_id, event.message_id, event.user_id, &event.emoji)
                .await
            {
                tracing::warn!(
                    "Failed to strip reject reaction by {} on {}: {}",
                    event.user_id,
                    event.message_id,
                    e
                );
            }
            return Ok(PendingOutcome::Stripped);
        }

        if event.user_id == record.author_id {
            tracing::info!(
                "Ignoring self-decision by {} on {}",
                event.user_id,
                event.message_id
            );
            return Ok(PendingOutcome::SelfDecision);
        }

        if is_reject {
            return self.reject(&settings, event.user_id).await;
        }

        match collector.approval_emoji(&event.emoji) {
            Some(approval) => self.approve(&settings, event.user_id, approval.clone()).await,
            None => Ok(PendingOutcome::Ignored),
        }
    }

    async fn is_moderator(
        &self,
        settings: &BotSettings,
        event: &ReactionEvent,
    ) -> Result<bool, AppError> {
        let guild_id = event.guild_id.unwrap_or(self.state.guild_id);
        let roles = self
            .state
            .gateway
            .member_role_ids(guild_id, event.user_id)
            .await?;

        Ok(roles
            .iter()
            .any(|role| settings.moderator_role_ids.contains(role)))
    }

    /// Approval transition: persist, run the policy hook, then credit early reactors.
    async fn approve(
        &self,
        settings: &BotSettings,
        moderator_id: u64,
        approval: DecisionEmoji,
    ) -> Result<PendingOutcome, AppError> {
        let collector = self.policy.settings(settings);
        let repo = ReactionCollectorRepository::new(&self.state.db);
        let now = Utc::now();

        let snapshot = {
            let mut record = self.record.lock().await;
            let param = ApproveCollectorParam {
                message_id: self.message_id,
                approved_by: moderator_id,
                approved_on: now,
                expires: collector.reward_deadline(now)?,
                metadata: CollectorMetadata {
                    approval_emoji: approval.emoji.clone(),
                    keyword: approval.keyword.clone(),
                },
            };

            if !repo.approve(param.clone()).await? {
                if let Some(stored) = repo.find_by_message_id(self.message_id).await? {
                    *record = stored;
                }
                return Ok(PendingOutcome::AlreadyDecided);
            }

            record.approved = true;
            record.approved_by = Some(param.approved_by);
            record.approved_on = Some(param.approved_on);
            record.expires = param.expires;
            record.metadata = Some(param.metadata);
            record.clone()
        };

        tracing::info!(
            "{} submission {} approved by {} with {}; reward window open until {}",
            snapshot.collector_type.label(),
            snapshot.message_id,
            moderator_id,
            approval.emoji,
            snapshot.expires
        );

        if let Err(e) = self
            .policy
            .approve_submission(&self.state, settings, &snapshot, moderator_id, &approval)
            .await
        {
            tracing::error!(
                "Approval hook failed for submission {}: {}",
                snapshot.message_id,
                e
            );
        }

        let backfilled = self.backfill(settings, &snapshot).await;
        Ok(PendingOutcome::Approved { backfilled })
    }

    /// Rejection transition: persist, close immediately, remove the bot's seeded emoji.
    async fn reject(
        &self,
        settings: &BotSettings,
        moderator_id: u64,
    ) -> Result<PendingOutcome, AppError> {
        let collector = self.policy.settings(settings);
        let repo = ReactionCollectorRepository::new(&self.state.db);
        let now = Utc::now();

        let snapshot = {
            let mut record = self.record.lock().await;
            if !repo.reject(self.message_id, moderator_id, now).await? {
                if let Some(stored) = repo.find_by_message_id(self.message_id).await? {
                    *record = stored;
                }
                return Ok(PendingOutcome::AlreadyDecided);
            }

            record.rejected_by = Some(moderator_id);
            record.expires = now;
            record.clone()
        };

        for emoji in collector.seeded_emoji() {
            if let Err(e) = self
                .state
                .gateway
                .remove_own_reaction(snapshot.channel_id, snapshot.message_id, emoji)
                .await
            {
                tracing::warn!(
                    "Failed to remove {} from rejected submission {}: {}",
                    emoji,
                    snapshot.message_id,
                    e
                );
            }
        }

        tracing::info!(
            "{} submission {} rejected by {}",
            snapshot.collector_type.label(),
            snapshot.message_id,
            moderator_id
        );

        Ok(PendingOutcome::Rejected)
    }

    /// Credits everyone who reacted before approval.
    ///
    /// Returns how many users were newly rewarded. Failures are logged per user.
    async fn backfill(&self, settings: &BotSettings, record: &CollectorRecord) -> usize {
        let collector = self.policy.settings(settings);
        let reactions = match self
            .state
            .gateway
            .message_reactions(record.channel_id, record.message_id)
            .await
        {
            Ok(reactions) => reactions,
            Err(e) => {
                tracing::error!(
                    "Failed to fetch reactions for back-fill of {}: {}",
                    record.message_id,
                    e
                );
                return 0;
            }
        };

        let mut rewarded = 0;
        for reaction in reactions {
            if collector.is_decision_emoji(&reaction.emoji) {
                continue;
            }

            for user_id in reaction.user_ids {
                match self.reward_reactor(settings, record, user_id).await {
                    Ok(RewardOutcome::Rewarded) => rewarded += 1,
                    Ok(_) => {}
                    Err(e) => tracing::error!(
                        "Back-fill of {} failed for user {}: {}",
                        record.message_id,
                        user_id,
                        e
                    ),
                }
            }
        }

        if rewarded > 0 {
            tracing::info!(
                "Back-filled {} early reactors on {}",
                rewarded,
                record.message_id
            );
        }
        rewarded
    }

    /// Handles a reaction during the reward window.
    ///
    /// # Returns
    /// - `Ok(RewardOutcome)` - Whether the reactor was credited
    /// - `Err(AppError)` - Settings not loaded or the receipt could not be stored
    pub async fn handle_open_reaction(
        &self,
        event: &ReactionEvent,
    ) -> Result<RewardOutcome, AppError> {
        let settings = self.state.config.current()?;
        let collector = self.policy.settings(&settings);
        let record = self.record().await;

        if record.state_at(Utc::now()) != CollectorState::ApprovedOpen
            || collector.is_decision_emoji(&event.emoji)
        {
            return Ok(RewardOutcome::Ignored);
        }

        self.reward_reactor(&settings, &record, event.user_id).await
    }

    /// Credits one reactor at most once.
    async fn reward_reactor(
        &self,
        settings: &BotSettings,
        record: &CollectorRecord,
        user_id: u64,
    ) -> Result<RewardOutcome, AppError> {
        if user_id == self.state.bot_user_id || user_id == record.author_id {
            return Ok(RewardOutcome::Ignored);
        }

        if !self.rewarded_cache().insert(user_id) {
            return Ok(RewardOutcome::AlreadyRewarded);
        }

        let repo = ReactionCollectorRepository::new(&self.state.db);
        let stored = match repo
            .store_user_reaction(record.message_id, user_id, Utc::now())
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                self.rewarded_cache().remove(&user_id);
                return Err(e);
            }
        };
        if !stored {
            return Ok(RewardOutcome::AlreadyRewarded);
        }

        let collector = self.policy.settings(settings);
        let outcome = reward_member(
            &self.state,
            user_id,
            collector.reaction_reward,
            PointsMetadata::new(
                record.collector_type.label(),
                format!("Reacted to a {} submission", record.collector_type.label()),
            )
            .for_message(record.message_id),
            record.channel_id,
            true,
        )
        .await;

        if let Err(e) = self
            .policy
            .reaction_received(&self.state, settings, record, user_id)
            .await
        {
            tracing::error!(
                "Reaction hook failed on {} for user {}: {}",
                record.message_id,
                user_id,
                e
            );
        }

        Ok(outcome)
    }

    /// Drives the collector from a stream of reactions on its message.
    ///
    /// Each window ends at the record's `expires`; a deadline is derived from the
    /// remaining time whenever the state changes. Returns the terminal state, or the
    /// current one if the stream ends first.
    pub async fn run<S>(self: Arc<Self>, mut events: S) -> CollectorState
    where
        S: Stream<Item = ReactionEvent> + Unpin,
    {
        loop {
            let record = self.record().await;
            let now = Utc::now();
            let state = record.state_at(now);

            let remaining = match (state, record.remaining(now)) {
                (CollectorState::PendingApproval | CollectorState::ApprovedOpen, Some(r)) => r,
                (CollectorState::Rejected, _) => return CollectorState::Rejected,
                _ => return CollectorState::Closed,
            };
            let deadline = tokio::time::Instant::now() + remaining;

            loop {
                let event = match tokio::time::timeout_at(deadline, events.next()).await {
                    Ok(Some(event)) => event,
                    Ok(None) => return state,
                    Err(_) => {
                        match state {
                            CollectorState::PendingApproval => tracing::info!(
                                "Approval window lapsed for {} without a decision",
                                self.message_id
                            ),
                            _ => tracing::info!("Reward window closed for {}", self.message_id),
                        }
                        return CollectorState::Closed;
                    }
                };

                if state == CollectorState::PendingApproval {
                    match self.handle_pending_reaction(&event).await {
                        Ok(
                            PendingOutcome::Approved { .. }
                            | PendingOutcome::Rejected
                            | PendingOutcome::AlreadyDecided,
                        ) => break,
                        Ok(_) => {}
                        Err(e) => tracing::error!(
                            "Failed to handle decision reaction on {}: {}",
                            self.message_id,
                            e
                        ),
                    }
                } else if let Err(e) = self.handle_open_reaction(&event).await {
                    tracing::error!(
                        "Failed to handle reaction by {} on {}: {}",
                        event.user_id,
                        self.message_id,
                        e
                    );
                }
            }
        }
    }

    fn rewarded_cache(&self) -> std::sync::MutexGuard<'_, HashSet<u64>> {
        self.rewarded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
