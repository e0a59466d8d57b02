//! Linked account repository.
//!
//! Accounts are created by the web application when a user connects Discord; the
//! bot only looks them up and maintains the `total_points` balance snapshot.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};

use crate::{error::AppError, model::ledger::LinkedAccount};

pub struct LeylineUserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LeylineUserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the account linked to a Discord user.
    ///
    /// # Returns
    /// - `Ok(Some(LinkedAccount))` - The user has connected their account
    /// - `Ok(None)` - No linked account
    /// - `Err(AppError)` - Database error or malformed record
    pub async fn find_by_discord_id(
        &self,
        discord_id: u64,
    ) -> Result<Option<LinkedAccount>, AppError> {
        entity::prelude::LeylineUser::find()
            .filter(entity::leyline_user::Column::DiscordId.eq(discord_id.to_string()))
            .one(self.db)
            .await?
            .map(LinkedAccount::from_entity)
            .transpose()
    }

    pub async fn find_by_uid(&self, uid: &str) -> Result<Option<LinkedAccount>, AppError> {
        entity::prelude::LeylineUser::find_by_id(uid.to_string())
            .one(self.db)
            .await?
            .map(LinkedAccount::from_entity)
            .transpose()
    }

    /// Links a Discord user to a web-app account.
    pub async fn link(
        &self,
        uid: &str,
        discord_id: u64,
        username: &str,
    ) -> Result<LinkedAccount, AppError> {
        let entity = entity::leyline_user::ActiveModel {
            uid: ActiveValue::Set(uid.to_string()),
            discord_id: ActiveValue::Set(discord_id.to_string()),
            username: ActiveValue::Set(username.to_string()),
            total_points: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        LinkedAccount::from_entity(entity)
    }

    /// Adds `amount` to the balance snapshot.
    ///
    /// # Returns
    /// - `Ok(true)` - Balance updated
    /// - `Ok(false)` - No account with that uid
    pub async fn add_points(&self, uid: &str, amount: i64) -> Result<bool, AppError> {
        let result = entity::prelude::LeylineUser::update_many()
            .col_expr(
                entity::leyline_user::Column::TotalPoints,
                Expr::col(entity::leyline_user::Column::TotalPoints).add(amount),
            )
            .filter(entity::leyline_user::Column::Uid.eq(uid))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
