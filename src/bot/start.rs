use serenity::all::{Client, GatewayIntents};

use crate::{bot::handler::Handler, config::Config, error::AppError, state::AppState};

/// Starts the Discord bot and runs until it shuts down.
///
/// Call from within a spawned task; this does not return while the bot is connected.
///
/// # Returns
/// - `Ok(())` - The client shut down cleanly
/// - `Err(AppError::DiscordErr)` - Login or gateway connection failed
pub async fn start_bot(config: &Config, state: AppState) -> Result<(), AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(state);

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
