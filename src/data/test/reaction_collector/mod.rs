use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::{
    data::reaction_collector::ReactionCollectorRepository,
    error::AppError,
    model::reaction_collector::{
        ApproveCollectorParam, CollectorMetadata, CollectorState, CollectorType,
        CreateCollectorParam,
    },
};

mod approve;
mod create;
mod get_active;
mod reject;
mod store_user_reaction;

fn approve_param(message_id: u64, approved_by: u64) -> ApproveCollectorParam {
    let now = Utc::now();
    ApproveCollectorParam {
        message_id,
        approved_by,
        approved_on: now,
        expires: now + Duration::hours(24),
        metadata: CollectorMetadata {
            approval_emoji: "🌱".to_string(),
            keyword: Some("Environment".to_string()),
        },
    }
}
