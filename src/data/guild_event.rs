//! Claim event repository (`guild_event`, `guild_event_claim`).

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter,
};

use crate::{
    data::is_unique_violation,
    error::AppError,
    model::guild_event::{CreateGuildEventParam, GuildEvent},
};

pub struct GuildEventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GuildEventRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        param: &CreateGuildEventParam,
        now: DateTime<Utc>,
    ) -> Result<GuildEvent, AppError> {
        let expires = now
            .checked_add_signed(param.duration)
            .ok_or_else(|| AppError::BadRequest("Duration is out of range".to_string()))?;

        let entity = entity::guild_event::ActiveModel {
            name: ActiveValue::Set(param.name.clone()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(None),
            points: ActiveValue::Set(param.points),
            max_claims: ActiveValue::Set(param.max_claims),
            expires: ActiveValue::Set(expires),
            created_by: ActiveValue::Set(param.created_by.to_string()),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        GuildEvent::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<GuildEvent>, AppError> {
        entity::prelude::GuildEvent::find_by_id(id)
            .one(self.db)
            .await?
            .map(GuildEvent::from_entity)
            .transpose()
    }

    /// Records the announcement message once it has been posted.
    pub async fn set_message_id(&self, id: i32, message_id: u64) -> Result<(), AppError> {
        let Some(existing) = entity::prelude::GuildEvent::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Err(AppError::NotFound(format!("Guild event {} not found", id)));
        };

        let mut active: entity::guild_event::ActiveModel = existing.into();
        active.message_id = ActiveValue::Set(Some(message_id.to_string()));
        active.update(self.db).await?;

        Ok(())
    }

    pub async fn count_claims(&self, event_id: i32) -> Result<u64, AppError> {
        Ok(entity::prelude::GuildEventClaim::find()
            .filter(entity::guild_event_claim::Column::EventId.eq(event_id))
            .count(self.db)
            .await?)
    }

    /// Stores a claim.
    ///
    /// # Returns
    /// - `Ok(true)` - Claim stored
    /// - `Ok(false)` - The user had already claimed this event
    pub async fn create_claim(
        &self,
        event_id: i32,
        discord_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = entity::guild_event_claim::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            discord_id: ActiveValue::Set(discord_id.to_string()),
            claimed_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
