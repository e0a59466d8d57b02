//! Durable delayed jobs.
//!
//! Every delayed side effect is persisted with its due time so a restart never
//! loses it; the scheduler picks up whatever is due on its next tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The work a task performs, serialized as its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduledJob {
    Unmute { punishment_id: i32 },
    Unban { punishment_id: i32 },
}

impl ScheduledJob {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unmute { .. } => "unmute",
            Self::Unban { .. } => "unban",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask {
    pub id: i32,
    pub job: ScheduledJob,
    pub due_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScheduledTask {
    pub fn from_entity(entity: entity::scheduled_task::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            job: serde_json::from_value(entity.payload)?,
            due_at: entity.due_at,
            completed_at: entity.completed_at,
        })
    }
}
