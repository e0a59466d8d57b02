//! Chat platform seam.
//!
//! Collectors and services talk to Discord only through [`ChatGateway`], which
//! keeps the approval/reward state machine independent of Serenity's types and
//! lets tests substitute a recording gateway.

pub mod discord;

#[cfg(test)]
pub mod mock;

use serenity::async_trait;

use crate::error::AppError;

pub use self::discord::SerenityGateway;

/// Users who currently hold one reaction on a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReactionUsers {
    pub emoji: String,
    pub user_ids: Vec<u64>,
}

#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Reacts to a message as the bot.
    async fn react(&self, channel_id: u64, message_id: u64, emoji: &str) -> Result<(), AppError>;

    /// Removes one user's reaction.
    async fn remove_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        user_id: u64,
        emoji: &str,
    ) -> Result<(), AppError>;

    /// Removes a reaction the bot added itself.
    async fn remove_own_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> Result<(), AppError>;

    /// Current reactions on a message, grouped by emoji.
    async fn message_reactions(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Vec<MessageReactionUsers>, AppError>;

    async fn member_role_ids(&self, guild_id: u64, user_id: u64) -> Result<Vec<u64>, AppError>;

    /// Posts a message and returns its id.
    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64, AppError>;

    /// Sends a direct message; fails when the recipient has DMs disabled.
    async fn send_dm(&self, user_id: u64, content: &str) -> Result<(), AppError>;

    /// Opens a thread on a message and returns the thread id.
    async fn create_thread(
        &self,
        channel_id: u64,
        message_id: u64,
        name: &str,
    ) -> Result<u64, AppError>;

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn kick(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError>;

    async fn ban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError>;

    async fn unban(&self, guild_id: u64, user_id: u64) -> Result<(), AppError>;

    /// Posts a message carrying a single button and returns the message id.
    async fn send_button_message(
        &self,
        channel_id: u64,
        content: &str,
        custom_id: &str,
        label: &str,
    ) -> Result<u64, AppError>;
}
