//! Punishment repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    error::AppError,
    model::punishment::{Punishment, PunishmentKind},
};

pub struct PunishmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PunishmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        kind: PunishmentKind,
        discord_id: u64,
        issued_by: u64,
        reason: &str,
        issued_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Punishment, AppError> {
        let entity = entity::punishment::ActiveModel {
            discord_id: ActiveValue::Set(discord_id.to_string()),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            reason: ActiveValue::Set(reason.to_string()),
            issued_by: ActiveValue::Set(issued_by.to_string()),
            issued_at: ActiveValue::Set(issued_at),
            expires_at: ActiveValue::Set(expires_at),
            reversed: ActiveValue::Set(false),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Punishment::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Punishment>, AppError> {
        entity::prelude::Punishment::find_by_id(id)
            .one(self.db)
            .await?
            .map(Punishment::from_entity)
            .transpose()
    }

    /// Gets a user's punishment history, newest first.
    pub async fn get_by_discord_id(&self, discord_id: u64) -> Result<Vec<Punishment>, AppError> {
        entity::prelude::Punishment::find()
            .filter(entity::punishment::Column::DiscordId.eq(discord_id.to_string()))
            .order_by_desc(entity::punishment::Column::IssuedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Punishment::from_entity)
            .collect()
    }

    /// Flags a punishment as reversed.
    ///
    /// # Returns
    /// - `Ok(true)` - Flag set
    /// - `Ok(false)` - Already reversed or not found
    pub async fn mark_reversed(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Punishment::update_many()
            .col_expr(entity::punishment::Column::Reversed, Expr::value(true))
            .filter(entity::punishment::Column::Id.eq(id))
            .filter(entity::punishment::Column::Reversed.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
