//! Button interactions.

use chrono::Utc;
use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Interaction,
};

use crate::{
    error::AppError,
    model::guild_event::parse_claim_button,
    service::guild_event::GuildEventService,
    state::AppState,
};

/// Answers claim buttons; every other interaction is ignored.
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    let Interaction::Component(component) = interaction else {
        return;
    };

    let Some(event_id) = parse_claim_button(&component.data.custom_id) else {
        return;
    };

    let reply = match claim_reply(state, event_id, component.user.id.get()).await {
        Ok(reply) => reply,
        Err(AppError::NotFound(_)) => "This event no longer exists.".to_string(),
        Err(e) => {
            tracing::error!(
                "Failed to process claim of event {} by {}: {}",
                event_id,
                component.user.id,
                e
            );
            "Something went wrong, please try again later.".to_string()
        }
    };

    if let Err(e) = respond_ephemeral(&ctx, &component, reply).await {
        tracing::error!("Failed to answer claim interaction: {}", e);
    }
}

async fn claim_reply(state: &AppState, event_id: i32, user_id: u64) -> Result<String, AppError> {
    let outcome = GuildEventService::new(state)
        .claim(event_id, user_id, Utc::now())
        .await?;
    let settings = state.config.current()?;

    Ok(outcome.reply(&settings.connect_url))
}

async fn respond_ephemeral(
    ctx: &Context,
    component: &ComponentInteraction,
    content: String,
) -> Result<(), AppError> {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    component.create_response(&ctx.http, response).await?;
    Ok(())
}
