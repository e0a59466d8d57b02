//! Ready event handler.

use serenity::all::{ActivityData, Context, Ready};

/// Logs the connection and sets the bot's status.
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::watching("for good acts")));
}
