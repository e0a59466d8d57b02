//! Durable delayed job repository (`scheduled_task`).

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    error::AppError,
    model::scheduled_task::{ScheduledJob, ScheduledTask},
};

pub struct ScheduledTaskRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ScheduledTaskRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Persists a job to run at `due_at`.
    pub async fn schedule(
        &self,
        job: &ScheduledJob,
        due_at: DateTime<Utc>,
    ) -> Result<ScheduledTask, AppError> {
        let entity = entity::scheduled_task::ActiveModel {
            kind: ActiveValue::Set(job.kind().to_string()),
            payload: ActiveValue::Set(serde_json::to_value(job)?),
            due_at: ActiveValue::Set(due_at),
            completed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ScheduledTask::from_entity(entity)
    }

    /// Gets incomplete tasks due at or before `now`, earliest first.
    ///
    /// Each entry carries the task id so a malformed payload can be reported and
    /// skipped without hiding the other tasks.
    pub async fn get_due(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<(i32, Result<ScheduledTask, AppError>)>, AppError> {
        let entities = entity::prelude::ScheduledTask::find()
            .filter(entity::scheduled_task::Column::CompletedAt.is_null())
            .filter(entity::scheduled_task::Column::DueAt.lte(now))
            .order_by_asc(entity::scheduled_task::Column::DueAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|entity| (entity.id, ScheduledTask::from_entity(entity)))
            .collect())
    }

    /// Marks a task as done.
    pub async fn complete(&self, id: i32, now: DateTime<Utc>) -> Result<(), AppError> {
        entity::prelude::ScheduledTask::update_many()
            .col_expr(
                entity::scheduled_task::Column::CompletedAt,
                Expr::value(Some(now)),
            )
            .filter(entity::scheduled_task::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
