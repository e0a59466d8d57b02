use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use std::{collections::HashSet, sync::Arc};
use test_utils::{builder::TestBuilder, context::TestContext, factory};

use crate::{
    bot::gateway::{
        mock::{GatewayCall, MockGateway},
        MessageReactionUsers,
    },
    data::reaction_collector::ReactionCollectorRepository,
    error::AppError,
    model::{
        ledger::PointsEntry,
        reaction_collector::{
            CollectorState, CollectorType, PendingOutcome, ReactionEvent, RewardOutcome,
        },
        settings::BotSettings,
    },
    service::{
        ledger::RewardLedgerService,
        reaction_collector::{live::LiveCollector, CollectorService, Submission},
    },
    state::{
        test_state::{self, BOT_USER_ID, GUILD_ID},
        AppState,
    },
};


const GOOD_ACTS_CHANNEL: u64 = 1;
const KIND_WORDS_CHANNEL: u64 = 2;
const MOD_ROLE: u64 = 500;
const MODERATOR: u64 = 10;
const SECOND_MODERATOR: u64 = 11;
const AUTHOR: u64 = 20;
const USER_A: u64 = 30;
const USER_B: u64 = 31;
const USER_C: u64 = 32;

/// Default settings with both collector types monitoring one channel each.
fn settings() -> BotSettings {
    let mut settings = BotSettings::default();
    settings.moderator_role_ids = vec![MOD_ROLE];
    settings.good_acts.channel_ids = vec![GOOD_ACTS_CHANNEL];
    settings.kind_words.channel_ids = vec![KIND_WORDS_CHANNEL];
    settings
}

fn reaction(message_id: u64, user_id: u64, emoji: &str) -> ReactionEvent {
    ReactionEvent {
        message_id,
        channel_id: GOOD_ACTS_CHANNEL,
        guild_id: Some(GUILD_ID),
        user_id,
        emoji: emoji.to_string(),
    }
}

/// In-memory store, recording gateway and state wired together.
struct Harness {
    _test: TestContext,
    db: DatabaseConnection,
    gateway: Arc<MockGateway>,
    state: AppState,
}

impl Harness {
    async fn new() -> Self {
        Self::with(MockGateway::new(), settings()).await
    }

    /// Builds a harness around a customized gateway and settings.
    ///
    /// Both moderators are always given the moderator role.
    async fn with(gateway: MockGateway, settings: BotSettings) -> Self {
        let test = TestBuilder::new()
            .with_collector_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.clone().unwrap();

        let gateway = Arc::new(
            gateway
                .with_roles(MODERATOR, &[MOD_ROLE])
                .with_roles(SECOND_MODERATOR, &[MOD_ROLE]),
        );
        let state = test_state::build(&db, gateway.clone(), settings);

        Self {
            _test: test,
            db,
            gateway,
            state,
        }
    }

    /// Stores a pending record by `AUTHOR` and returns a collector bound to it.
    async fn pending(&self, collector_type: CollectorType) -> Arc<LiveCollector> {
        let channel_id = match collector_type {
            CollectorType::GoodActs => GOOD_ACTS_CHANNEL,
            CollectorType::KindWords => KIND_WORDS_CHANNEL,
        };
        let entity = factory::reaction_collector::ReactionCollectorFactory::new(&self.db)
            .collector_type(collector_type.as_str())
            .channel_id(channel_id)
            .author_id(AUTHOR)
            .expires(Utc::now() + Duration::hours(168))
            .build()
            .await
            .unwrap();

        self.live(entity.message_id.parse().unwrap(), HashSet::new())
            .await
    }

    /// Stores a Good Acts record by `AUTHOR` approved by `MODERATOR` with an open
    /// reward window.
    async fn approved(&self) -> Arc<LiveCollector> {
        let entity = factory::reaction_collector::ReactionCollectorFactory::new(&self.db)
            .author_id(AUTHOR)
            .approved_by(MODERATOR)
            .expires(Utc::now() + Duration::hours(24))
            .build()
            .await
            .unwrap();

        self.live(entity.message_id.parse().unwrap(), HashSet::new())
            .await
    }

    /// Loads a stored record into a collector with the given reward cache.
    async fn live(&self, message_id: u64, rewarded: HashSet<u64>) -> Arc<LiveCollector> {
        let record = self.stored(message_id).await;
        Arc::new(LiveCollector::new(self.state.clone(), record, rewarded))
    }

    async fn stored(&self, message_id: u64) -> crate::model::reaction_collector::CollectorRecord {
        ReactionCollectorRepository::new(&self.db)
            .find_by_message_id(message_id)
            .await
            .unwrap()
            .unwrap()
    }

    async fn link(&self, discord_id: u64) {
        factory::leyline_user::create_linked_user(&self.db, discord_id)
            .await
            .unwrap();
    }

    /// Ledger entries for a Discord user tagged with `message_id`.
    async fn points_for(&self, discord_id: u64, message_id: u64) -> Vec<PointsEntry> {
        let ledger = RewardLedgerService::new(&self.db, &self.state.mint_queue);
        let Some(uid) = ledger.get_leyline_uid(discord_id).await.unwrap() else {
            return Vec::new();
        };

        let message_id = message_id.to_string();
        ledger
            .get_entries(&uid)
            .await
            .unwrap()
            .into_iter()
            .filter(|entry| entry.metadata.message_id.as_deref() == Some(message_id.as_str()))
            .collect()
    }
}
