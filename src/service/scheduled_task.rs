//! Runs durable delayed jobs once they are due.

use chrono::{DateTime, Utc};

use crate::{
    data::scheduled_task::ScheduledTaskRepository,
    error::AppError,
    model::scheduled_task::{ScheduledJob, ScheduledTask},
    service::punishment::PunishmentService,
    state::AppState,
};

pub struct ScheduledTaskService<'a> {
    state: &'a AppState,
}

impl<'a> ScheduledTaskService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Dispatches every task due at `now`.
    ///
    /// A task that fails stays pending and is retried on the next tick. A task
    /// whose payload no longer parses can never run and is completed with an error
    /// log.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of tasks completed
    /// - `Err(AppError)` - The due tasks could not be queried
    pub async fn process_due(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let repo = ScheduledTaskRepository::new(&self.state.db);
        let mut completed = 0;

        for (id, task) in repo.get_due(now).await? {
            let task = match task {
                Ok(task) => task,
                Err(e) => {
                    tracing::error!("Discarding scheduled task {} with bad payload: {}", id, e);
                    repo.complete(id, now).await?;
                    completed += 1;
                    continue;
                }
            };

            match self.dispatch(&task).await {
                Ok(()) => {
                    repo.complete(task.id, now).await?;
                    completed += 1;
                }
                Err(e) => tracing::error!(
                    "Scheduled {} task {} failed, will retry: {}",
                    task.job.kind(),
                    task.id,
                    e
                ),
            }
        }

        Ok(completed)
    }

    async fn dispatch(&self, task: &ScheduledTask) -> Result<(), AppError> {
        match &task.job {
            ScheduledJob::Unmute { punishment_id } | ScheduledJob::Unban { punishment_id } => {
                match PunishmentService::new(self.state)
                    .reverse(*punishment_id)
                    .await
                {
                    Ok(_) => Ok(()),
                    Err(AppError::NotFound(msg)) => {
                        tracing::warn!("Scheduled {} for missing punishment: {}", task.job.kind(), msg);
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }
}
