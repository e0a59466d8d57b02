use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::{
    bot::gateway::SerenityGateway,
    config::Config,
    error::AppError,
    feed::ChangeFeed,
    service::{config::ConfigService, config_cache::ConfigCache, ledger::mint::MintQueue},
    state::AppState,
};

/// Initializes the tracing subscriber.
///
/// Filter directives come from `RUST_LOG`, defaulting to `leylinebot=info`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leylinebot=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for the mint queue.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?)
}

/// Builds the application state.
///
/// Loads (or seeds) the bot settings, starts the config cache listener, and
/// resolves the bot's own user id through the Discord REST API.
///
/// # Returns
/// - `Ok((AppState, updated_at))` - State and when the settings were last written
/// - `Err(AppError)` - Database, settings or Discord failure
pub async fn build_state(
    config: &Config,
    db: DatabaseConnection,
) -> Result<(AppState, chrono::DateTime<chrono::Utc>), AppError> {
    let http = Arc::new(Http::new(&config.discord_bot_token));
    let bot_user = http.get_current_user().await?;
    tracing::info!("Authenticated as {} ({})", bot_user.name, bot_user.id);

    let feed = ChangeFeed::new();
    let (settings, updated_at) = ConfigService::new(&db, &feed).load_or_init().await?;
    let config_cache = ConfigCache::with_settings(settings);
    config_cache.spawn_listener(&feed);

    let mint_queue = MintQueue::new(setup_reqwest_client()?, config.mint_queue_url.clone());

    let state = AppState::new(
        db,
        Arc::new(SerenityGateway::new(http)),
        config_cache,
        feed,
        mint_queue,
        config.discord_guild_id,
        bot_user.id.get(),
        config.admin_token.clone(),
    );

    Ok((state, updated_at))
}
