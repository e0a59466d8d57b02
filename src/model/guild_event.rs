//! Claim events: time-boxed announcements whose button awards points once per user.

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::AppError,
    util::parse::{parse_optional_u64, parse_u64_from_string},
};

/// Custom id prefix of claim buttons.
pub const CLAIM_BUTTON_PREFIX: &str = "claim:";

#[derive(Debug, Clone, PartialEq)]
pub struct GuildEvent {
    pub id: i32,
    pub name: String,
    pub channel_id: u64,
    pub message_id: Option<u64>,
    pub points: i64,
    pub max_claims: Option<i32>,
    pub expires: DateTime<Utc>,
    pub created_by: u64,
}

impl GuildEvent {
    pub fn from_entity(entity: entity::guild_event::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            channel_id: parse_u64_from_string(&entity.channel_id)?,
            message_id: parse_optional_u64(entity.message_id.as_deref())?,
            points: entity.points,
            max_claims: entity.max_claims,
            expires: entity.expires,
            created_by: parse_u64_from_string(&entity.created_by)?,
        })
    }

    pub fn claim_button_id(&self) -> String {
        format!("{}{}", CLAIM_BUTTON_PREFIX, self.id)
    }
}

/// Extracts the event id from a claim button custom id.
pub fn parse_claim_button(custom_id: &str) -> Option<i32> {
    custom_id
        .strip_prefix(CLAIM_BUTTON_PREFIX)
        .and_then(|id| id.parse().ok())
}

#[derive(Debug, Clone)]
pub struct CreateGuildEventParam {
    pub name: String,
    pub channel_id: u64,
    pub points: i64,
    pub duration: Duration,
    pub max_claims: Option<i32>,
    pub created_by: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Claimed { points: i64 },
    AlreadyClaimed,
    NotLinked,
    Closed,
    Full,
}

impl ClaimOutcome {
    /// Ephemeral reply shown to the user who pressed the button.
    pub fn reply(&self, connect_url: &str) -> String {
        match self {
            Self::Claimed { points } => format!("You claimed {} LLP!", points),
            Self::AlreadyClaimed => "You already claimed this event.".to_string(),
            Self::NotLinked => format!(
                "You need to connect your Leyline account first: {}",
                connect_url
            ),
            Self::Closed => "This event has ended.".to_string(),
            Self::Full => "All rewards for this event have been claimed.".to_string(),
        }
    }
}
