//! [`ChatGateway`] implementation over Serenity's HTTP client.

use serenity::{
    all::{
        ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateMessage, CreateThread,
        GuildId, MessageId, ReactionType, RoleId, UserId,
    },
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::{
    bot::gateway::{ChatGateway, MessageReactionUsers},
    error::AppError,
};

/// Discord caps reaction user pages at 100.
const REACTION_PAGE_SIZE: u8 = 100;

/// Days of message history removed when banning.
const BAN_DELETE_MESSAGE_DAYS: u8 = 0;

pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Parses a stored emoji, either unicode or the `<:name:id>` custom form.
fn reaction_type(emoji: &str) -> ReactionType {
    ReactionType::try_from(emoji).unwrap_or_else(|_| ReactionType::Unicode(emoji.to_string()))
}

#[async_trait]
impl ChatGateway for SerenityGateway {
    async fn react(&self, channel_id: u64, message_id: u64, emoji: &str) -> Result<(), AppError> {
        self.http
            .create_reaction(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                &reaction_type(emoji),
            )
            .await?;
        Ok(())
    }

    async fn remove_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        user_id: u64,
        emoji: &str,
    ) -> Result<(), AppError> {
        self.http
            .delete_reaction(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                UserId::new(user_id),
                &reaction_type(emoji),
            )
            .await?;
        Ok(())
    }

    async fn remove_own_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> Result<(), AppError> {
        self.http
            .delete_reaction_me(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                &reaction_type(emoji),
            )
            .await?;
        Ok(())
    }

    async fn message_reactions(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Vec<MessageReactionUsers>, AppError> {
        let channel_id = ChannelId::new(channel_id);
        let message_id = MessageId::new(message_id);
        let message = self.http.get_message(channel_id, message_id).await?;

        let mut reactions = Vec::with_capacity(message.reactions.len());
        for reaction in &message.reactions {
            let mut user_ids = Vec::new();
            let mut after = None;

            loop {
                let page = self
                    .http
                    .get_reaction_users(
                        channel_id,
                        message_id,
                        &reaction.reaction_type,
                        REACTION_PAGE_SIZE,
                        after,
                    )
                    .await?;

                let page_len = page.len();
                after = page.last().map(|user| user.id.get());
                user_ids.extend(page.into_iter().map(|user| user.id.get()));

                if page_len < REACTION_PAGE_SIZE as usize {
                    break;
                }
            }

            reactions.push(MessageReactionUsers {
                emoji: reaction.reaction_type.to_string(),
                user_ids,
            });
        }

        Ok(reactions)
    }

    async fn member_role_ids(&self, guild_id: u64, user_id: u64) -> Result<Vec<u64>, AppError> {
        let member = self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await?;

        Ok(member.roles.iter().map(|role| role.get()).collect())
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64, AppError> {
        let message = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().content(content))
            .await?;
        Ok(message.id.get())
    }

    async fn send_dm(&self, user_id: u64, content: &str) -> Result<(), AppError> {
        let channel = UserId::new(user_id).create_dm_channel(&self.http).await?;
        channel
            .send_message(&self.http, CreateMessage::new().content(content))
            .await?;
        Ok(())
    }

    async fn create_thread(
        &self,
        channel_id: u64,
        message_id: u64,
        name: &str,
    ) -> Result<u64, AppError> {
        let thread = ChannelId::new(channel_id)
            .create_thread_from_message(
                &self.http,
                MessageId::new(message_id),
                CreateThread::new(name),
            )
            .await?;
        Ok(thread.id.get())
    }

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            )
            .await?;
        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            )
            .await?;
        Ok(())
    }

    async fn kick(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError> {
        self.http
            .kick_member(GuildId::new(guild_id), UserId::new(user_id), Some(reason))
            .await?;
        Ok(())
    }

    async fn ban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError> {
        self.http
            .ban_user(
                GuildId::new(guild_id),
                UserId::new(user_id),
                BAN_DELETE_MESSAGE_DAYS,
                Some(reason),
            )
            .await?;
        Ok(())
    }

    async fn unban(&self, guild_id: u64, user_id: u64) -> Result<(), AppError> {
        self.http
            .remove_ban(GuildId::new(guild_id), UserId::new(user_id), None)
            .await?;
        Ok(())
    }

    async fn send_button_message(
        &self,
        channel_id: u64,
        content: &str,
        custom_id: &str,
        label: &str,
    ) -> Result<u64, AppError> {
        let button = CreateButton::new(custom_id)
            .label(label)
            .style(ButtonStyle::Primary);
        let message = CreateMessage::new()
            .content(content)
            .components(vec![CreateActionRow::Buttons(vec![button])]);

        let message = ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await?;
        Ok(message.id.get())
    }
}
