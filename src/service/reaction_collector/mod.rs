//! Reaction collector service.
//!
//! Starts collectors for new submissions and re-arms the unexpired ones after a
//! restart. Each live collector runs in its own task, fed by the
//! [`registry::CollectorRegistry`] with reactions on its message.
//!
//! - `live` - The approval/reward state machine for one message
//! - `policy` - Per-type approval and reaction hooks
//! - `registry` - Message id to collector routing
//! - `rewards` - Point awards with unlinked-user notices

pub mod live;
pub mod policy;
pub mod registry;
pub mod rewards;

#[cfg(test)]
mod test;

use chrono::Utc;
use std::{collections::HashSet, sync::Arc, time::Duration};

use crate::{
    data::reaction_collector::ReactionCollectorRepository,
    error::AppError,
    model::reaction_collector::{CollectorState, CollectorType, CreateCollectorParam},
    service::reaction_collector::live::LiveCollector,
    state::AppState,
};

/// A submission message a collector should be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub message_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
}

/// A collector re-armed by [`CollectorService::rehydrate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RehydratedCollector {
    pub message_id: u64,
    pub state: CollectorState,
    /// Time left in the re-armed window.
    pub remaining: Duration,
    /// Users already credited before the restart.
    pub rewarded: usize,
}

pub struct CollectorService<'a> {
    state: &'a AppState,
}

impl<'a> CollectorService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Binds a new collector to a submission.
    ///
    /// Persists the pending record, seeds the decision emoji and starts listening.
    /// A submission that already has a live collector is left alone.
    ///
    /// # Returns
    /// - `Ok(Some(collector))` - Collector started
    /// - `Ok(None)` - The message is already tracked
    /// - `Err(AppError)` - Settings not loaded or the record could not be stored
    pub async fn create(
        &self,
        submission: Submission,
        collector_type: CollectorType,
    ) -> Result<Option<Arc<LiveCollector>>, AppError> {
        if self.state.collectors.is_tracking(submission.message_id) {
            return Ok(None);
        }

        let settings = self.state.config.current()?;
        let collector = settings.collector(collector_type);

        let record = ReactionCollectorRepository::new(&self.state.db)
            .create(CreateCollectorParam {
                message_id: submission.message_id,
                collector_type,
                channel_id: submission.channel_id,
                author_id: submission.author_id,
                expires: collector.approval_deadline(Utc::now())?,
            })
            .await?;

        for emoji in collector.seeded_emoji() {
            if let Err(e) = self
                .state
                .gateway
                .react(submission.channel_id, submission.message_id, emoji)
                .await
            {
                tracing::warn!(
                    "Failed to seed {} on submission {}: {}",
                    emoji,
                    submission.message_id,
                    e
                );
            }
        }

        tracing::info!(
            "Started {} collector on {} by {}, awaiting approval until {}",
            collector_type.label(),
            record.message_id,
            record.author_id,
            record.expires
        );

        let live = Arc::new(LiveCollector::new(self.state.clone(), record, HashSet::new()));
        self.spawn(live.clone());
        Ok(Some(live))
    }

    /// Re-arms every unexpired collector from the store.
    ///
    /// Reward caches are rebuilt from the stored receipts and each window resumes
    /// with the time it had left. A malformed record is logged and skipped.
    ///
    /// # Returns
    /// - `Ok(Vec<RehydratedCollector>)` - The collectors now running
    /// - `Err(AppError)` - The active records could not be queried
    pub async fn rehydrate(&self) -> Result<Vec<RehydratedCollector>, AppError> {
        let repo = ReactionCollectorRepository::new(&self.state.db);
        let now = Utc::now();
        let mut rehydrated = Vec::new();

        for (id, record) in repo.get_active(now).await? {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::error!("Skipping malformed collector record {}: {}", id, e);
                    continue;
                }
            };

            if self.state.collectors.is_tracking(record.message_id) {
                continue;
            }

            let Some(remaining) = record.remaining(now) else {
                continue;
            };

            let rewarded: HashSet<u64> = match repo.get_reacted_users(record.message_id).await {
                Ok(users) => users.into_iter().map(|user| user.user_id).collect(),
                Err(e) => {
                    tracing::error!(
                        "Skipping collector {}: could not load its receipts: {}",
                        id,
                        e
                    );
                    continue;
                }
            };

            let summary = RehydratedCollector {
                message_id: record.message_id,
                state: record.state_at(now),
                remaining,
                rewarded: rewarded.len(),
            };

            let live = Arc::new(LiveCollector::new(self.state.clone(), record, rewarded));
            self.spawn(live);
            rehydrated.push(summary);
        }

        tracing::info!("Rehydrated {} reaction collectors", rehydrated.len());
        Ok(rehydrated)
    }

    /// Routes the message's reactions to `live` and runs it to completion in a task.
    fn spawn(&self, live: Arc<LiveCollector>) {
        let registry = self.state.collectors.clone();
        let message_id = live.message_id();
        let events = registry.register(message_id);

        tokio::spawn(async move {
            let state = live.run(events).await;
            registry.remove(message_id);
            tracing::debug!("Collector {} finished in state {:?}", message_id, state);
        });
    }
}
