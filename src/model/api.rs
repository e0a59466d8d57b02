//! Data transfer objects for the admin HTTP API.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    model::{
        guild_event::{CreateGuildEventParam, GuildEvent},
        punishment::{IssuePunishmentParam, Punishment, PunishmentKind},
        reaction_collector::{CollectorMetadata, CollectorRecord, ReactedUser},
    },
};

/// Longest duration the admin API accepts: ten years.
pub const MAX_DURATION_MINUTES: i64 = 60 * 24 * 365 * 10;

fn duration_from_minutes(minutes: i64) -> Result<Duration, AppError> {
    if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(AppError::BadRequest(format!(
            "Duration must be between 1 and {} minutes",
            MAX_DURATION_MINUTES
        )));
    }
    Ok(Duration::minutes(minutes))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorDto {
    pub message_id: String,
    pub collector_type: String,
    pub channel_id: String,
    pub author_id: String,
    pub approved: bool,
    pub expires: DateTime<Utc>,
    pub approved_by: Option<String>,
    pub approved_on: Option<DateTime<Utc>>,
    pub rejected_by: Option<String>,
    pub metadata: Option<CollectorMetadata>,
    pub reacted_users: Vec<String>,
}

impl CollectorDto {
    pub fn new(record: CollectorRecord, reacted: Vec<ReactedUser>) -> Self {
        Self {
            message_id: record.message_id.to_string(),
            collector_type: record.collector_type.as_str().to_string(),
            channel_id: record.channel_id.to_string(),
            author_id: record.author_id.to_string(),
            approved: record.approved,
            expires: record.expires,
            approved_by: record.approved_by.map(|id| id.to_string()),
            approved_on: record.approved_on,
            rejected_by: record.rejected_by.map(|id| id.to_string()),
            metadata: record.metadata,
            reacted_users: reacted.into_iter().map(|r| r.user_id.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunishmentKindDto {
    Warn,
    Mute,
    Kick,
    Ban,
}

impl From<PunishmentKindDto> for PunishmentKind {
    fn from(dto: PunishmentKindDto) -> Self {
        match dto {
            PunishmentKindDto::Warn => PunishmentKind::Warn,
            PunishmentKindDto::Mute => PunishmentKind::Mute,
            PunishmentKindDto::Kick => PunishmentKind::Kick,
            PunishmentKindDto::Ban => PunishmentKind::Ban,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuePunishmentDto {
    pub kind: PunishmentKindDto,
    pub target_id: u64,
    pub moderator_id: u64,
    pub reason: String,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

impl TryFrom<IssuePunishmentDto> for IssuePunishmentParam {
    type Error = AppError;

    fn try_from(dto: IssuePunishmentDto) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: dto.kind.into(),
            target_id: dto.target_id,
            moderator_id: dto.moderator_id,
            reason: dto.reason,
            duration: dto
                .duration_minutes
                .map(duration_from_minutes)
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PunishmentDto {
    pub id: i32,
    pub discord_id: String,
    pub kind: String,
    pub reason: String,
    pub issued_by: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Punishment> for PunishmentDto {
    fn from(punishment: Punishment) -> Self {
        Self {
            id: punishment.id,
            discord_id: punishment.discord_id.to_string(),
            kind: punishment.kind.as_str().to_string(),
            reason: punishment.reason,
            issued_by: punishment.issued_by.to_string(),
            issued_at: punishment.issued_at,
            expires_at: punishment.expires_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGuildEventDto {
    pub name: String,
    pub channel_id: u64,
    pub points: i64,
    pub duration_minutes: i64,
    #[serde(default)]
    pub max_claims: Option<i32>,
    pub created_by: u64,
}

impl TryFrom<CreateGuildEventDto> for CreateGuildEventParam {
    type Error = AppError;

    fn try_from(dto: CreateGuildEventDto) -> Result<Self, Self::Error> {
        Ok(Self {
            name: dto.name,
            channel_id: dto.channel_id,
            points: dto.points,
            duration: duration_from_minutes(dto.duration_minutes)?,
            max_claims: dto.max_claims,
            created_by: dto.created_by,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GuildEventDto {
    pub id: i32,
    pub name: String,
    pub channel_id: String,
    pub message_id: Option<String>,
    pub points: i64,
    pub max_claims: Option<i32>,
    pub expires: DateTime<Utc>,
}

impl From<GuildEvent> for GuildEventDto {
    fn from(event: GuildEvent) -> Self {
        Self {
            id: event.id,
            name: event.name,
            channel_id: event.channel_id.to_string(),
            message_id: event.message_id.map(|id| id.to_string()),
            points: event.points,
            max_claims: event.max_claims,
            expires: event.expires,
        }
    }
}
