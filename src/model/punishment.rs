//! Domain models for moderation sentences.

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::{internal::InternalError, AppError},
    util::parse::parse_u64_from_string,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunishmentKind {
    Warn,
    Mute,
    Kick,
    Ban,
}

impl PunishmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warn => "WARN",
            Self::Mute => "MUTE",
            Self::Kick => "KICK",
            Self::Ban => "BAN",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value {
            "WARN" => Ok(Self::Warn),
            "MUTE" => Ok(Self::Mute),
            "KICK" => Ok(Self::Kick),
            "BAN" => Ok(Self::Ban),
            other => Err(InternalError::UnknownVariant {
                kind: "punishment kind",
                value: other.to_string(),
            }),
        }
    }

    /// Whether a duration makes sense, i.e. the sentence can be reversed later.
    pub fn is_reversible(&self) -> bool {
        matches!(self, Self::Mute | Self::Ban)
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Warn => "warned",
            Self::Mute => "muted",
            Self::Kick => "kicked",
            Self::Ban => "banned",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Punishment {
    pub id: i32,
    pub discord_id: u64,
    pub kind: PunishmentKind,
    pub reason: String,
    pub issued_by: u64,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub reversed: bool,
}

impl Punishment {
    pub fn from_entity(entity: entity::punishment::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            discord_id: parse_u64_from_string(&entity.discord_id)?,
            kind: PunishmentKind::parse(&entity.kind)?,
            reason: entity.reason,
            issued_by: parse_u64_from_string(&entity.issued_by)?,
            issued_at: entity.issued_at,
            expires_at: entity.expires_at,
            reversed: entity.reversed,
        })
    }
}

#[derive(Debug, Clone)]
pub struct IssuePunishmentParam {
    pub kind: PunishmentKind,
    pub target_id: u64,
    pub moderator_id: u64,
    pub reason: String,
    /// Only meaningful for mutes and bans; `None` is permanent.
    pub duration: Option<Duration>,
}
