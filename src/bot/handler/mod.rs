use serenity::all::{Context, EventHandler, Interaction, Message, Reaction, Ready};
use serenity::async_trait;

use crate::state::AppState;

pub mod interaction;
pub mod message;
pub mod reaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, _ctx: Context, message: Message) {
        message::handle_message(&self.state, message).await;
    }

    /// Called when a reaction is added to any message the bot can see
    async fn reaction_add(&self, _ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_add(&self.state, reaction).await;
    }

    /// Called for button presses and other interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.state, ctx, interaction).await;
    }
}
