//! Publisher for NFT mint jobs.

use reqwest::Client;

use crate::{error::AppError, model::ledger::MintJob};

/// Posts mint jobs as JSON to the minting worker's queue endpoint.
#[derive(Clone)]
pub struct MintQueue {
    client: Client,
    url: Option<String>,
}

impl MintQueue {
    pub fn new(client: Client, url: Option<String>) -> Self {
        Self { client, url }
    }

    /// A queue that accepts nothing; grants are still recorded in the inventory.
    pub fn disabled() -> Self {
        Self::new(Client::new(), None)
    }

    /// Publishes a job.
    ///
    /// # Returns
    /// - `Ok(true)` - The queue accepted the job
    /// - `Ok(false)` - No queue configured; the job was dropped with a warning
    /// - `Err(AppError::ReqwestErr)` - Request failed or returned an error status
    pub async fn publish(&self, job: &MintJob) -> Result<bool, AppError> {
        let Some(url) = &self.url else {
            tracing::warn!(
                "MINT_QUEUE_URL not set; skipping mint of item {} for {}",
                job.item_id,
                job.uid
            );
            return Ok(false);
        };

        self.client
            .post(url)
            .json(job)
            .send()
            .await?
            .error_for_status()?;

        Ok(true)
    }
}
