//! Ledger entry repository (`leyline_points`).
//!
//! Entries are append-only; every award is a new row.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    error::AppError,
    model::ledger::{PointsEntry, PointsMetadata},
};

pub struct LeylinePointsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LeylinePointsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends a ledger entry.
    ///
    /// # Returns
    /// - `Ok(PointsEntry)` - The appended entry
    /// - `Err(AppError)` - Database or serialization error
    pub async fn create(
        &self,
        uid: &str,
        amount: i64,
        metadata: &PointsMetadata,
        created: DateTime<Utc>,
    ) -> Result<PointsEntry, AppError> {
        let entity = entity::leyline_points::ActiveModel {
            uid: ActiveValue::Set(uid.to_string()),
            leyline_points: ActiveValue::Set(amount),
            created: ActiveValue::Set(created),
            metadata: ActiveValue::Set(serde_json::to_value(metadata)?),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        PointsEntry::from_entity(entity)
    }

    /// Gets all entries for an account, oldest first.
    pub async fn get_by_uid(&self, uid: &str) -> Result<Vec<PointsEntry>, AppError> {
        entity::prelude::LeylinePoints::find()
            .filter(entity::leyline_points::Column::Uid.eq(uid))
            .order_by_asc(entity::leyline_points::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(PointsEntry::from_entity)
            .collect()
    }
}
