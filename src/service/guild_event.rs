//! Claim events: an announcement with a button that pays out once per user.

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;

use crate::{
    data::guild_event::GuildEventRepository,
    error::AppError,
    model::{
        guild_event::{ClaimOutcome, CreateGuildEventParam, GuildEvent},
        ledger::PointsMetadata,
    },
    service::ledger::RewardLedgerService,
    state::AppState,
};

const CLAIM_LABEL: &str = "Claim";

pub struct GuildEventService<'a> {
    state: &'a AppState,
}

impl<'a> GuildEventService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Creates an event and posts its claim button.
    ///
    /// # Returns
    /// - `Ok(GuildEvent)` - Stored event with its announcement message id
    /// - `Err(AppError::BadRequest)` - Non-positive points, duration or claim cap
    /// - `Err(AppError)` - Database or Discord failure
    pub async fn create(&self, param: CreateGuildEventParam) -> Result<GuildEvent, AppError> {
        if param.points <= 0 {
            return Err(AppError::BadRequest("Points must be positive".to_string()));
        }
        if param.duration <= chrono::Duration::zero() {
            return Err(AppError::BadRequest("Duration must be positive".to_string()));
        }
        if matches!(param.max_claims, Some(max) if max <= 0) {
            return Err(AppError::BadRequest("Claim limit must be positive".to_string()));
        }

        let repo = GuildEventRepository::new(&self.state.db);
        let mut event = repo.create(&param, Utc::now()).await?;

        let content = format!(
            "📣 **{}**\nClaim {} LLP before <t:{}:R>!",
            event.name,
            event.points,
            event.expires.timestamp()
        );
        let message_id = self
            .state
            .gateway
            .send_button_message(event.channel_id, &content, &event.claim_button_id(), CLAIM_LABEL)
            .await?;

        repo.set_message_id(event.id, message_id).await?;
        event.message_id = Some(message_id);

        tracing::info!(
            "Created claim event {} ({}) in channel {}",
            event.id,
            event.name,
            event.channel_id
        );
        Ok(event)
    }

    /// Claims an event for a user.
    ///
    /// The claim row and its ledger entry are written in one transaction.
    ///
    /// # Returns
    /// - `Ok(ClaimOutcome)` - What happened; only `Claimed` writes to the ledger
    /// - `Err(AppError::NotFound)` - No such event
    pub async fn claim(
        &self,
        event_id: i32,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, AppError> {
        let repo = GuildEventRepository::new(&self.state.db);
        let event = repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Guild event {} not found", event_id)))?;

        if now >= event.expires {
            return Ok(ClaimOutcome::Closed);
        }

        let ledger = RewardLedgerService::new(&self.state.db, &self.state.mint_queue);
        let Some(uid) = ledger.get_leyline_uid(user_id).await? else {
            return Ok(ClaimOutcome::NotLinked);
        };

        if let Some(max_claims) = event.max_claims {
            if repo.count_claims(event.id).await? >= max_claims as u64 {
                return Ok(ClaimOutcome::Full);
            }
        }

        let txn = self.state.db.begin().await?;
        if !GuildEventRepository::new(&txn)
            .create_claim(event.id, user_id, now)
            .await?
        {
            txn.rollback().await?;
            return Ok(ClaimOutcome::AlreadyClaimed);
        }

        let metadata = PointsMetadata::new("Event", format!("Claimed {}", event.name));
        RewardLedgerService::append_points(&txn, &uid, event.points, &metadata).await?;
        txn.commit().await?;

        tracing::info!(
            "User {} claimed event {} for {} LLP",
            user_id,
            event.id,
            event.points
        );

        Ok(ClaimOutcome::Claimed {
            points: event.points,
        })
    }
}
