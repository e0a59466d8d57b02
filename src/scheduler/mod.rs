//! Cron jobs.
//!
//! One job runs every minute: it dispatches due scheduled tasks and publishes
//! out-of-band edits of the settings document to the change feed.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError,
    service::{config::ConfigService, scheduled_task::ScheduledTaskService},
    state::AppState,
};

/// Starts the maintenance scheduler.
///
/// Runs one tick immediately so anything that fell due while the bot was down is
/// handled at boot rather than a minute later.
///
/// # Arguments
/// - `state` - Application state
/// - `config_updated_at` - When the settings document was last loaded
///
/// # Returns
/// - `Ok(JobScheduler)` - The running scheduler; keep it alive
/// - `Err(AppError::SchedulerErr)` - The job could not be created or started
pub async fn start_scheduler(
    state: AppState,
    config_updated_at: DateTime<Utc>,
) -> Result<JobScheduler, AppError> {
    let watermark = Arc::new(Mutex::new(config_updated_at));

    run_tick(&state, &watermark).await;

    let scheduler = JobScheduler::new().await?;

    let job_state = state.clone();
    let job_watermark = watermark.clone();
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let state = job_state.clone();
        let watermark = job_watermark.clone();

        Box::pin(async move {
            run_tick(&state, &watermark).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(scheduler)
}

async fn run_tick(state: &AppState, watermark: &Mutex<DateTime<Utc>>) {
    let now = Utc::now();

    match ScheduledTaskService::new(state).process_due(now).await {
        Ok(0) => {}
        Ok(completed) => tracing::info!("Completed {} scheduled tasks", completed),
        Err(e) => tracing::error!("Error processing scheduled tasks: {}", e),
    }

    let mut since = watermark.lock().await;
    match ConfigService::new(&state.db, &state.feed)
        .poll_external_edit(*since)
        .await
    {
        Ok(Some(updated_at)) => *since = updated_at,
        Ok(None) => {}
        Err(e) => tracing::error!("Error polling bot settings: {}", e),
    }
}
