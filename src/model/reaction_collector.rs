//! Domain models for reaction collectors.
//!
//! A collector is bound to one submission message and walks it through a
//! moderator approval window followed by a public reward window. The record
//! in the store is the source of truth; [`CollectorRecord::state_at`] derives the
//! current state from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{internal::InternalError, AppError},
    util::parse::{parse_optional_u64, parse_u64_from_string},
};

/// Content type of a submission; selects the collector policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectorType {
    GoodActs,
    KindWords,
}

impl CollectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoodActs => "GOOD_ACTS",
            Self::KindWords => "KIND_WORDS",
        }
    }

    /// Human readable name used in announcements and ledger categories.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GoodActs => "Good Acts",
            Self::KindWords => "Kind Words",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value {
            "GOOD_ACTS" => Ok(Self::GoodActs),
            "KIND_WORDS" => Ok(Self::KindWords),
            other => Err(InternalError::UnknownVariant {
                kind: "collector type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    PendingApproval,
    ApprovedOpen,
    Closed,
    Rejected,
}

/// Metadata attached at approval time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorMetadata {
    pub approval_emoji: String,
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectorRecord {
    /// Identifier of the bound message.
    pub message_id: u64,
    pub collector_type: CollectorType,
    pub channel_id: u64,
    pub author_id: u64,
    pub approved: bool,
    /// End of the window that is currently open.
    pub expires: DateTime<Utc>,
    pub approved_by: Option<u64>,
    pub approved_on: Option<DateTime<Utc>>,
    pub rejected_by: Option<u64>,
    pub metadata: Option<CollectorMetadata>,
    pub created_at: DateTime<Utc>,
}

impl CollectorRecord {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(CollectorRecord)` - Converted record
    /// - `Err(AppError::InternalErr)` - Stored id or type tag is malformed
    /// - `Err(AppError::SerdeErr)` - Stored metadata is malformed
    pub fn from_entity(entity: entity::reaction_collector::Model) -> Result<Self, AppError> {
        let metadata = entity
            .metadata
            .map(serde_json::from_value::<CollectorMetadata>)
            .transpose()?;

        Ok(Self {
            message_id: parse_u64_from_string(&entity.message_id)?,
            collector_type: CollectorType::parse(&entity.collector_type)?,
            channel_id: parse_u64_from_string(&entity.channel_id)?,
            author_id: parse_u64_from_string(&entity.author_id)?,
            approved: entity.approved,
            expires: entity.expires,
            approved_by: parse_optional_u64(entity.approved_by.as_deref())?,
            approved_on: entity.approved_on,
            rejected_by: parse_optional_u64(entity.rejected_by.as_deref())?,
            metadata,
            created_at: entity.created_at,
        })
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> CollectorState {
        if self.rejected_by.is_some() {
            CollectorState::Rejected
        } else if now >= self.expires {
            CollectorState::Closed
        } else if self.approved {
            CollectorState::ApprovedOpen
        } else {
            CollectorState::PendingApproval
        }
    }

    /// Time left in the current window, `None` once it has lapsed.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        (self.expires - now)
            .to_std()
            .ok()
            .filter(|remaining| !remaining.is_zero())
    }

    pub fn keyword(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.keyword.as_deref())
    }
}

/// Parameters for creating a pending collector record.
#[derive(Debug, Clone)]
pub struct CreateCollectorParam {
    pub message_id: u64,
    pub collector_type: CollectorType,
    pub channel_id: u64,
    pub author_id: u64,
    pub expires: DateTime<Utc>,
}

/// Parameters for the approval transition.
#[derive(Debug, Clone)]
pub struct ApproveCollectorParam {
    pub message_id: u64,
    pub approved_by: u64,
    pub approved_on: DateTime<Utc>,
    /// End of the reward window.
    pub expires: DateTime<Utc>,
    pub metadata: CollectorMetadata,
}

/// Reaction receipt stored under a collector.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactedUser {
    pub message_id: u64,
    pub user_id: u64,
    pub timestamp: DateTime<Utc>,
}

impl ReactedUser {
    pub fn from_entity(entity: entity::reacted_user::Model) -> Result<Self, AppError> {
        Ok(Self {
            message_id: parse_u64_from_string(&entity.message_id)?,
            user_id: parse_u64_from_string(&entity.user_id)?,
            timestamp: entity.timestamp,
        })
    }
}

/// A reaction added to a tracked message, stripped of platform types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub message_id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub user_id: u64,
    pub emoji: String,
}

/// Result of feeding a reaction to a collector in its approval window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOutcome {
    /// Not a decision: non-decision emoji, bot reaction or non-moderator approval.
    Ignored,
    /// A non-moderator used the reject emoji; the reaction was removed.
    Stripped,
    /// The author tried to decide on their own submission.
    SelfDecision,
    /// Another decision already won.
    AlreadyDecided,
    /// Approved, with the number of early reactors credited by the back-fill.
    Approved { backfilled: usize },
    Rejected,
}

/// Result of feeding a reaction to a collector in its reward window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardOutcome {
    /// Window not open, or the reaction does not qualify.
    Ignored,
    AlreadyRewarded,
    Rewarded,
    /// The reactor has no linked account and was told how to link one.
    NotLinked,
    /// Receipt stored but the ledger write failed.
    Failed,
}
