//! Recording [`ChatGateway`] used by tests.

use serenity::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use crate::{
    bot::gateway::{ChatGateway, MessageReactionUsers},
    error::AppError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    React { message_id: u64, emoji: String },
    RemoveReaction { message_id: u64, user_id: u64, emoji: String },
    RemoveOwnReaction { message_id: u64, emoji: String },
    SendMessage { channel_id: u64, content: String },
    SendDm { user_id: u64, content: String },
    CreateThread { message_id: u64, name: String },
    AddRole { user_id: u64, role_id: u64 },
    RemoveRole { user_id: u64, role_id: u64 },
    Kick { user_id: u64 },
    Ban { user_id: u64 },
    Unban { user_id: u64 },
    ButtonMessage { channel_id: u64, custom_id: String },
}

#[derive(Default)]
pub struct MockGateway {
    calls: Mutex<Vec<GatewayCall>>,
    roles: Mutex<HashMap<u64, Vec<u64>>>,
    reactions: Mutex<Vec<MessageReactionUsers>>,
    dm_disabled: Mutex<HashSet<u64>>,
    next_id: AtomicU64,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(900_000),
            ..Default::default()
        }
    }

    /// Gives `user_id` the listed roles.
    pub fn with_roles(self, user_id: u64, role_ids: &[u64]) -> Self {
        self.roles.lock().unwrap().insert(user_id, role_ids.to_vec());
        self
    }

    /// Makes DMs to `user_id` fail as if the user disabled them.
    pub fn with_dms_disabled(self, user_id: u64) -> Self {
        self.dm_disabled.lock().unwrap().insert(user_id);
        self
    }

    /// Sets the reaction list returned for every message.
    pub fn set_reactions(&self, reactions: Vec<MessageReactionUsers>) {
        *self.reactions.lock().unwrap() = reactions;
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn messages_to(&self, channel: u64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::SendMessage { channel_id, content } if channel_id == channel => {
                    Some(content)
                }
                _ => None,
            })
            .collect()
    }

    pub fn dms_to(&self, user: u64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::SendDm { user_id, content } if user_id == user => Some(content),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn react(&self, _channel_id: u64, message_id: u64, emoji: &str) -> Result<(), AppError> {
        self.record(GatewayCall::React {
            message_id,
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    async fn remove_reaction(
        &self,
        _channel_id: u64,
        message_id: u64,
        user_id: u64,
        emoji: &str,
    ) -> Result<(), AppError> {
        self.record(GatewayCall::RemoveReaction {
            message_id,
            user_id,
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    async fn remove_own_reaction(
        &self,
        _channel_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> Result<(), AppError> {
        self.record(GatewayCall::RemoveOwnReaction {
            message_id,
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    async fn message_reactions(
        &self,
        _channel_id: u64,
        _message_id: u64,
    ) -> Result<Vec<MessageReactionUsers>, AppError> {
        Ok(self.reactions.lock().unwrap().clone())
    }

    async fn member_role_ids(&self, _guild_id: u64, user_id: u64) -> Result<Vec<u64>, AppError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64, AppError> {
        self.record(GatewayCall::SendMessage {
            channel_id,
            content: content.to_string(),
        });
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn send_dm(&self, user_id: u64, content: &str) -> Result<(), AppError> {
        if self.dm_disabled.lock().unwrap().contains(&user_id) {
            return Err(AppError::BadRequest(format!(
                "Cannot send messages to user {}",
                user_id
            )));
        }
        self.record(GatewayCall::SendDm {
            user_id,
            content: content.to_string(),
        });
        Ok(())
    }

    async fn create_thread(
        &self,
        _channel_id: u64,
        message_id: u64,
        name: &str,
    ) -> Result<u64, AppError> {
        self.record(GatewayCall::CreateThread {
            message_id,
            name: name.to_string(),
        });
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn add_role(
        &self,
        _guild_id: u64,
        user_id: u64,
        role_id: u64,
        _reason: &str,
    ) -> Result<(), AppError> {
        self.record(GatewayCall::AddRole { user_id, role_id });
        Ok(())
    }

    async fn remove_role(
        &self,
        _guild_id: u64,
        user_id: u64,
        role_id: u64,
        _reason: &str,
    ) -> Result<(), AppError> {
        self.record(GatewayCall::RemoveRole { user_id, role_id });
        Ok(())
    }

    async fn kick(&self, _guild_id: u64, user_id: u64, _reason: &str) -> Result<(), AppError> {
        self.record(GatewayCall::Kick { user_id });
        Ok(())
    }

    async fn ban(&self, _guild_id: u64, user_id: u64, _reason: &str) -> Result<(), AppError> {
        self.record(GatewayCall::Ban { user_id });
        Ok(())
    }

    async fn unban(&self, _guild_id: u64, user_id: u64) -> Result<(), AppError> {
        self.record(GatewayCall::Unban { user_id });
        Ok(())
    }

    async fn send_button_message(
        &self,
        channel_id: u64,
        _content: &str,
        custom_id: &str,
        _label: &str,
    ) -> Result<u64, AppError> {
        self.record(GatewayCall::ButtonMessage {
            channel_id,
            custom_id: custom_id.to_string(),
        });
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}
