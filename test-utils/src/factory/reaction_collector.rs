//! Factory for collector records and reaction receipts.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating collector records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let record = ReactionCollectorFactory::new(&db)
///     .collector_type("KIND_WORDS")
///     .expires(Utc::now() - Duration::hours(1))
///     .build()
///     .await?;
/// ```
pub struct ReactionCollectorFactory<'a> {
    db: &'a DatabaseConnection,
    message_id: String,
    collector_type: String,
    channel_id: String,
    author_id: String,
    approved: bool,
    expires: DateTime<Utc>,
    approved_by: Option<String>,
    rejected_by: Option<String>,
    metadata: Option<serde_json::Value>,
}

impl<'a> ReactionCollectorFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - message_id, author_id: unique ids
    /// - collector_type: `"GOOD_ACTS"`
    /// - channel_id: `"1"`
    /// - pending approval, expiring in one day
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            message_id: next_id().to_string(),
            collector_type: "GOOD_ACTS".to_string(),
            channel_id: "1".to_string(),
            author_id: next_id().to_string(),
            approved: false,
            expires: Utc::now() + Duration::days(1),
            approved_by: None,
            rejected_by: None,
            metadata: None,
        }
    }

    pub fn message_id(mut self, message_id: u64) -> Self {
        self.message_id = message_id.to_string();
        self
    }

    /// Sets the raw type tag, so malformed tags can be stored too.
    pub fn collector_type(mut self, collector_type: impl Into<String>) -> Self {
        self.collector_type = collector_type.into();
        self
    }

    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id.to_string();
        self
    }

    pub fn author_id(mut self, author_id: u64) -> Self {
        self.author_id = author_id.to_string();
        self
    }

    /// Marks the record approved by `approved_by`.
    pub fn approved_by(mut self, approved_by: u64) -> Self {
        self.approved = true;
        self.approved_by = Some(approved_by.to_string());
        self
    }

    pub fn rejected_by(mut self, rejected_by: u64) -> Self {
        self.rejected_by = Some(rejected_by.to_string());
        self
    }

    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = expires;
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Builds and inserts the record.
    pub async fn build(self) -> Result<entity::reaction_collector::Model, DbErr> {
        let now = Utc::now();
        entity::reaction_collector::ActiveModel {
            message_id: ActiveValue::Set(self.message_id),
            collector_type: ActiveValue::Set(self.collector_type),
            channel_id: ActiveValue::Set(self.channel_id),
            author_id: ActiveValue::Set(self.author_id),
            approved: ActiveValue::Set(self.approved),
            expires: ActiveValue::Set(self.expires),
            approved_on: ActiveValue::Set(self.approved_by.as_ref().map(|_| now)),
            approved_by: ActiveValue::Set(self.approved_by),
            rejected_by: ActiveValue::Set(self.rejected_by),
            metadata: ActiveValue::Set(self.metadata),
            created_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending Good Acts record with default values.
pub async fn create_reaction_collector(
    db: &DatabaseConnection,
) -> Result<entity::reaction_collector::Model, DbErr> {
    ReactionCollectorFactory::new(db).build().await
}

/// Stores a reaction receipt for `user_id` on `message_id`.
pub async fn create_reacted_user(
    db: &DatabaseConnection,
    message_id: &str,
    user_id: u64,
) -> Result<entity::reacted_user::Model, DbErr> {
    entity::reacted_user::ActiveModel {
        message_id: ActiveValue::Set(message_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        reacted: ActiveValue::Set(true),
        timestamp: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
