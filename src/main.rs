mod bot;
mod config;
mod controller;
mod data;
mod error;
mod feed;
mod middleware;
mod model;
mod router;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use tower_http::trace::TraceLayer;

use crate::{config::Config, error::AppError, service::reaction_collector::CollectorService};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let (state, config_updated_at) = startup::build_state(&config, db).await?;

    // Re-arm collectors before connecting so no reaction arrives unrouted.
    CollectorService::new(&state).rehydrate().await?;

    let _scheduler = scheduler::start_scheduler(state.clone(), config_updated_at).await?;

    let bot_config = config.clone();
    let bot_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(&bot_config, bot_state).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let app = router::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!("Admin API listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
