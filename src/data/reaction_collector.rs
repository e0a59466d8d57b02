//! Reaction collector data repository.
//!
//! Persistence primitives for collector records (`reaction_collector`) and their
//! per-user reaction receipts (`reacted_user`). Decision writes are conditional so
//! that only the first moderator decision on a record takes effect.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    data::is_unique_violation,
    error::AppError,
    model::reaction_collector::{
        ApproveCollectorParam, CollectorRecord, CreateCollectorParam, ReactedUser,
    },
};

pub struct ReactionCollectorRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReactionCollectorRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the pending record for a submission, or returns the existing one.
    ///
    /// # Returns
    /// - `Ok(CollectorRecord)` - The created or already stored record
    /// - `Err(AppError)` - Database error or malformed stored record
    pub async fn create(&self, param: CreateCollectorParam) -> Result<CollectorRecord, AppError> {
        if let Some(existing) = self.find_by_message_id(param.message_id).await? {
            return Ok(existing);
        }

        let entity = entity::reaction_collector::ActiveModel {
            message_id: ActiveValue::Set(param.message_id.to_string()),
            collector_type: ActiveValue::Set(param.collector_type.as_str().to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            approved: ActiveValue::Set(false),
            expires: ActiveValue::Set(param.expires),
            approved_by: ActiveValue::Set(None),
            approved_on: ActiveValue::Set(None),
            rejected_by: ActiveValue::Set(None),
            metadata: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        CollectorRecord::from_entity(entity)
    }

    /// Fetches a collector record by its message id.
    pub async fn find_by_message_id(
        &self,
        message_id: u64,
    ) -> Result<Option<CollectorRecord>, AppError> {
        entity::prelude::ReactionCollector::find_by_id(message_id.to_string())
            .one(self.db)
            .await?
            .map(CollectorRecord::from_entity)
            .transpose()
    }

    /// Gets every record whose current window is still open at `now`.
    ///
    /// Conversion is done per record so one malformed document does not hide the
    /// others; each entry carries the raw id for logging.
    ///
    /// # Returns
    /// - `Ok(Vec<(id, Result<CollectorRecord>)>)` - Unexpired records, oldest first
    /// - `Err(AppError)` - Database error during query
    pub async fn get_active(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<(String, Result<CollectorRecord, AppError>)>, AppError> {
        let entities = entity::prelude::ReactionCollector::find()
            .filter(entity::reaction_collector::Column::Expires.gt(now))
            .filter(entity::reaction_collector::Column::RejectedBy.is_null())
            .order_by_asc(entity::reaction_collector::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|entity| (entity.message_id.clone(), CollectorRecord::from_entity(entity)))
            .collect())
    }

    /// Marks a pending record approved and moves its expiry to the end of the reward window.
    ///
    /// # Returns
    /// - `Ok(true)` - The record was pending and is now approved
    /// - `Ok(false)` - The record was already approved or rejected (or does not exist)
    /// - `Err(AppError)` - Database or serialization error
    pub async fn approve(&self, param: ApproveCollectorParam) -> Result<bool, AppError> {
        let metadata = serde_json::to_value(&param.metadata)?;

        let result = entity::prelude::ReactionCollector::update_many()
            .col_expr(entity::reaction_collector::Column::Approved, Expr::value(true))
            .col_expr(
                entity::reaction_collector::Column::ApprovedBy,
                Expr::value(Some(param.approved_by.to_string())),
            )
            .col_expr(
                entity::reaction_collector::Column::ApprovedOn,
                Expr::value(Some(param.approved_on)),
            )
            .col_expr(
                entity::reaction_collector::Column::Expires,
                Expr::value(param.expires),
            )
            .col_expr(
                entity::reaction_collector::Column::Metadata,
                Expr::value(Some(metadata)),
            )
            .filter(entity::reaction_collector::Column::MessageId.eq(param.message_id.to_string()))
            .filter(entity::reaction_collector::Column::Approved.eq(false))
            .filter(entity::reaction_collector::Column::RejectedBy.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Rejects a pending record, closing it immediately.
    ///
    /// # Returns
    /// - `Ok(true)` - The record was pending and is now rejected
    /// - `Ok(false)` - The record was already decided (or does not exist)
    pub async fn reject(
        &self,
        message_id: u64,
        rejected_by: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = entity::prelude::ReactionCollector::update_many()
            .col_expr(
                entity::reaction_collector::Column::RejectedBy,
                Expr::value(Some(rejected_by.to_string())),
            )
            .col_expr(entity::reaction_collector::Column::Expires, Expr::value(now))
            .filter(entity::reaction_collector::Column::MessageId.eq(message_id.to_string()))
            .filter(entity::reaction_collector::Column::Approved.eq(false))
            .filter(entity::reaction_collector::Column::RejectedBy.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Stores the reaction receipt for a user.
    ///
    /// # Returns
    /// - `Ok(true)` - Receipt created
    /// - `Ok(false)` - The user already has a receipt for this message
    /// - `Err(AppError)` - Database error
    pub async fn store_user_reaction(
        &self,
        message_id: u64,
        user_id: u64,
        timestamp: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let existing =
            entity::prelude::ReactedUser::find_by_id((message_id.to_string(), user_id.to_string()))
                .one(self.db)
                .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let result = entity::reacted_user::ActiveModel {
            message_id: ActiveValue::Set(message_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            reacted: ActiveValue::Set(true),
            timestamp: ActiveValue::Set(timestamp),
        }
        .insert(self.db)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Gets every reaction receipt stored for a message.
    pub async fn get_reacted_users(&self, message_id: u64) -> Result<Vec<ReactedUser>, AppError> {
        entity::prelude::ReactedUser::find()
            .filter(entity::reacted_user::Column::MessageId.eq(message_id.to_string()))
            .order_by_asc(entity::reacted_user::Column::Timestamp)
            .all(self.db)
            .await?
            .into_iter()
            .map(ReactedUser::from_entity)
            .collect()
    }
}
