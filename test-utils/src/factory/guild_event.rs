//! Factory for claim events.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct GuildEventFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    channel_id: String,
    points: i64,
    max_claims: Option<i32>,
    expires: DateTime<Utc>,
}

impl<'a> GuildEventFactory<'a> {
    /// Defaults: 50 points, no claim limit, open for one hour.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Event {}", next_id()),
            channel_id: "1".to_string(),
            points: 50,
            max_claims: None,
            expires: Utc::now() + Duration::hours(1),
        }
    }

    pub fn points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    pub fn max_claims(mut self, max_claims: i32) -> Self {
        self.max_claims = Some(max_claims);
        self
    }

    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = expires;
        self
    }

    pub async fn build(self) -> Result<entity::guild_event::Model, DbErr> {
        entity::guild_event::ActiveModel {
            name: ActiveValue::Set(self.name),
            channel_id: ActiveValue::Set(self.channel_id),
            message_id: ActiveValue::Set(None),
            points: ActiveValue::Set(self.points),
            max_claims: ActiveValue::Set(self.max_claims),
            expires: ActiveValue::Set(self.expires),
            created_by: ActiveValue::Set("1".to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open event with default values.
pub async fn create_guild_event(
    db: &DatabaseConnection,
) -> Result<entity::guild_event::Model, DbErr> {
    GuildEventFactory::new(db).build().await
}
