//! Reward ledger service.
//!
//! Points are an append-only ledger (`leyline_points`) with a balance snapshot on
//! the linked account. Both are written in one transaction so the snapshot never
//! drifts from the sum of entries. Inventory grants additionally publish a mint job
//! for the external minting worker.

pub mod mint;

#[cfg(test)]
mod test;

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    data::{
        inventory::InventoryRepository, leyline_points::LeylinePointsRepository,
        leyline_user::LeylineUserRepository,
    },
    error::AppError,
    model::ledger::{DiscordReward, MintJob, PointsEntry, PointsMetadata},
    service::ledger::mint::MintQueue,
};

/// Service providing ledger reads and writes for linked accounts.
pub struct RewardLedgerService<'a> {
    db: &'a DatabaseConnection,
    mint_queue: &'a MintQueue,
}

impl<'a> RewardLedgerService<'a> {
    /// Creates a new RewardLedgerService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `mint_queue` - Queue NFT grants are published to
    pub fn new(db: &'a DatabaseConnection, mint_queue: &'a MintQueue) -> Self {
        Self { db, mint_queue }
    }

    /// Whether the Discord user has connected a Leyline account.
    pub async fn is_user_connected_to_leyline(&self, discord_id: u64) -> Result<bool, AppError> {
        Ok(self.get_leyline_uid(discord_id).await?.is_some())
    }

    /// Resolves the Leyline uid linked to a Discord user.
    ///
    /// # Returns
    /// - `Ok(Some(uid))` - The user is linked
    /// - `Ok(None)` - The user is not linked
    /// - `Err(AppError)` - Database error or malformed account record
    pub async fn get_leyline_uid(&self, discord_id: u64) -> Result<Option<String>, AppError> {
        let user_repo = LeylineUserRepository::new(self.db);
        Ok(user_repo
            .find_by_discord_id(discord_id)
            .await?
            .map(|account| account.uid))
    }

    /// Appends a ledger entry and updates the balance snapshot atomically.
    ///
    /// # Arguments
    /// - `uid` - Leyline account to credit
    /// - `amount` - Points to add
    /// - `metadata` - Category and comment stored with the entry
    ///
    /// # Returns
    /// - `Ok(PointsEntry)` - The appended entry
    /// - `Err(AppError::NotFound)` - No account with that uid; nothing was written
    /// - `Err(AppError)` - Database error; the transaction is rolled back
    pub async fn award_points(
        &self,
        uid: &str,
        amount: i64,
        metadata: PointsMetadata,
    ) -> Result<PointsEntry, AppError> {
        let txn = self.db.begin().await?;
        let entry = Self::append_points(&txn, uid, amount, &metadata).await?;
        txn.commit().await?;

        tracing::info!(
            "Awarded {} LLP to {} ({}: {})",
            amount,
            uid,
            entry.metadata.category,
            entry.metadata.comment
        );

        Ok(entry)
    }

    /// Appends a ledger entry and bumps the balance snapshot on `conn`.
    ///
    /// `conn` should be a transaction owned by the caller.
    ///
    /// # Returns
    /// - `Ok(PointsEntry)` - The appended entry
    /// - `Err(AppError::NotFound)` - No account with that uid
    pub async fn append_points<C: ConnectionTrait>(
        conn: &C,
        uid: &str,
        amount: i64,
        metadata: &PointsMetadata,
    ) -> Result<PointsEntry, AppError> {
        let updated = LeylineUserRepository::new(conn)
            .add_points(uid, amount)
            .await?;
        if !updated {
            return Err(AppError::NotFound(format!("Leyline account {} not found", uid)));
        }

        LeylinePointsRepository::new(conn)
            .create(uid, amount, metadata, Utc::now())
            .await
    }

    /// Awards points to a Discord user if they are linked.
    ///
    /// # Returns
    /// - `Ok(DiscordReward::Awarded(entry))` - Points appended to the linked account
    /// - `Ok(DiscordReward::NotLinked)` - No linked account; nothing was written
    pub async fn reward_discord_user(
        &self,
        discord_id: u64,
        amount: i64,
        metadata: PointsMetadata,
    ) -> Result<DiscordReward, AppError> {
        let Some(uid) = self.get_leyline_uid(discord_id).await? else {
            return Ok(DiscordReward::NotLinked);
        };

        let entry = self.award_points(&uid, amount, metadata).await?;
        Ok(DiscordReward::Awarded(entry))
    }

    /// Grants one inventory item and asks the minting worker to mint it.
    ///
    /// The inventory write is authoritative; a failed or skipped publish is
    /// reported through the return value so the caller can log it.
    ///
    /// # Returns
    /// - `Ok(true)` - Item granted and mint job published
    /// - `Ok(false)` - Item granted, mint queue not configured
    /// - `Err(AppError)` - Database error, or the mint queue rejected the job
    pub async fn reward_nft(&self, uid: &str, item_id: i32) -> Result<bool, AppError> {
        let inventory_repo = InventoryRepository::new(self.db);
        let count = inventory_repo.increment(uid, item_id).await?;

        tracing::info!("Granted item {} to {} (now holds {})", item_id, uid, count);

        let job = MintJob {
            uid: uid.to_string(),
            item_id,
            requested_at: Utc::now(),
        };
        self.mint_queue.publish(&job).await
    }

    /// Gets every ledger entry for an account, oldest first.
    pub async fn get_entries(&self, uid: &str) -> Result<Vec<PointsEntry>, AppError> {
        LeylinePointsRepository::new(self.db).get_by_uid(uid).await
    }
}
