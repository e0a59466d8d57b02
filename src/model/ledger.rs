//! Models for the reward ledger: linked accounts, point entries and inventory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Web-app account linked to a Discord user.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedAccount {
    pub uid: String,
    pub discord_id: u64,
    pub username: String,
    pub total_points: i64,
}

impl LinkedAccount {
    pub fn from_entity(entity: entity::leyline_user::Model) -> Result<Self, AppError> {
        Ok(Self {
            uid: entity.uid,
            discord_id: parse_u64_from_string(&entity.discord_id)?,
            username: entity.username,
            total_points: entity.total_points,
        })
    }
}

/// Why points were awarded; stored alongside every ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsMetadata {
    pub category: String,
    pub comment: String,
    /// Message the award relates to, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl PointsMetadata {
    pub fn new(category: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            comment: comment.into(),
            message_id: None,
        }
    }

    pub fn for_message(mut self, message_id: u64) -> Self {
        self.message_id = Some(message_id.to_string());
        self
    }
}

/// An appended ledger entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsEntry {
    pub id: i32,
    pub uid: String,
    pub leyline_points: i64,
    pub created: DateTime<Utc>,
    pub metadata: PointsMetadata,
}

impl PointsEntry {
    pub fn from_entity(entity: entity::leyline_points::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            uid: entity.uid,
            leyline_points: entity.leyline_points,
            created: entity.created,
            metadata: serde_json::from_value(entity.metadata)?,
        })
    }
}

/// Job published to the mint queue for the external minting worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintJob {
    pub uid: String,
    pub item_id: i32,
    pub requested_at: DateTime<Utc>,
}

/// Outcome of trying to reward a Discord user directly.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscordReward {
    Awarded(PointsEntry),
    NotLinked,
}
