//! Application context shared by the bot, services, scheduler and admin API.
//!
//! Constructed once during startup and passed explicitly to everything that needs
//! it. All fields are cheap to clone: the database is a pool, the gateway and
//! registry are reference counted, and the config cache is a watch channel.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{
    bot::gateway::ChatGateway,
    feed::ChangeFeed,
    service::{
        config_cache::ConfigCache, ledger::mint::MintQueue,
        reaction_collector::registry::CollectorRegistry,
    },
};

#[derive(Clone)]
pub struct AppState {
    /// Document store connection pool.
    pub db: DatabaseConnection,

    /// The only path to the chat platform.
    pub gateway: Arc<dyn ChatGateway>,

    /// Live mirror of the bot settings document.
    pub config: ConfigCache,

    /// Change deltas for watched collections.
    pub feed: ChangeFeed,

    /// Live collectors keyed by message id.
    pub collectors: CollectorRegistry,

    /// Publishes NFT mint jobs.
    pub mint_queue: MintQueue,

    /// Guild the bot moderates.
    pub guild_id: u64,

    /// The bot's own user id; its reactions are never decisions or rewards.
    pub bot_user_id: u64,

    /// Bearer token required by the admin API.
    pub admin_token: String,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        gateway: Arc<dyn ChatGateway>,
        config: ConfigCache,
        feed: ChangeFeed,
        mint_queue: MintQueue,
        guild_id: u64,
        bot_user_id: u64,
        admin_token: String,
    ) -> Self {
        Self {
            db,
            gateway,
            config,
            feed,
            collectors: CollectorRegistry::new(),
            mint_queue,
            guild_id,
            bot_user_id,
            admin_token,
        }
    }
}

#[cfg(test)]
pub mod test_state {
    //! Application state wired to a recording gateway for tests.

    use super::*;
    use crate::{bot::gateway::mock::MockGateway, model::settings::BotSettings};

    pub const GUILD_ID: u64 = 1;
    pub const BOT_USER_ID: u64 = 999;
    pub const ADMIN_TOKEN: &str = "test-token";

    /// Builds state over `db` with the given settings loaded.
    pub fn build(
        db: &DatabaseConnection,
        gateway: Arc<MockGateway>,
        settings: BotSettings,
    ) -> AppState {
        AppState::new(
            db.clone(),
            gateway,
            ConfigCache::with_settings(settings),
            ChangeFeed::new(),
            MintQueue::disabled(),
            GUILD_ID,
            BOT_USER_ID,
            ADMIN_TOKEN.to_string(),
        )
    }
}
