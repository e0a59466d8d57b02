//! Moderation sentences: warn, mute, kick and ban.
//!
//! A sentence is applied through the gateway first and only then recorded, so a
//! failed Discord call leaves no phantom record. Timed mutes and bans schedule
//! their own reversal as a durable task in the same transaction as the record;
//! when that transaction fails the mute or ban is lifted again.

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;

use crate::{
    data::{punishment::PunishmentRepository, scheduled_task::ScheduledTaskRepository},
    error::AppError,
    model::{
        punishment::{IssuePunishmentParam, Punishment, PunishmentKind},
        scheduled_task::ScheduledJob,
    },
    service::notify::notify_user,
    state::AppState,
};

pub struct PunishmentService<'a> {
    state: &'a AppState,
}

impl<'a> PunishmentService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Issues a sentence.
    ///
    /// The target is told first (kicked and banned users can no longer be DMed);
    /// a failed DM does not stop the sentence.
    ///
    /// # Returns
    /// - `Ok(Punishment)` - Applied and recorded
    /// - `Err(AppError::BadRequest)` - Duration on a warn/kick, or no mute role configured
    /// - `Err(AppError)` - Discord or database failure
    pub async fn issue(&self, param: IssuePunishmentParam) -> Result<Punishment, AppError> {
        if param.duration.is_some() && !param.kind.is_reversible() {
            return Err(AppError::BadRequest(format!(
                "A {} cannot have a duration",
                param.kind.as_str().to_lowercase()
            )));
        }
        if matches!(param.duration, Some(d) if d <= chrono::Duration::zero()) {
            return Err(AppError::BadRequest("Duration must be positive".to_string()));
        }

        let settings = self.state.config.current()?;
        let mute_role_id = match (param.kind, settings.mute_role_id) {
            (PunishmentKind::Mute, None) => {
                return Err(AppError::BadRequest("No mute role is configured".to_string()))
            }
            (_, role) => role,
        };

        let now = Utc::now();
        let expires_at = param
            .duration
            .map(|d| {
                now.checked_add_signed(d)
                    .ok_or_else(|| AppError::BadRequest("Duration is out of range".to_string()))
            })
            .transpose()?;

        let notice = match expires_at {
            Some(expires_at) => format!(
                "You have been {} until {}. Reason: {}",
                param.kind.past_tense(),
                expires_at.format("%Y-%m-%d %H:%M UTC"),
                param.reason
            ),
            None => format!(
                "You have been {}. Reason: {}",
                param.kind.past_tense(),
                param.reason
            ),
        };
        notify_user(self.state.gateway.as_ref(), param.target_id, None, &notice).await;

        let gateway = &self.state.gateway;
        let guild_id = self.state.guild_id;
        match (param.kind, mute_role_id) {
            (PunishmentKind::Warn, _) => {}
            (PunishmentKind::Mute, Some(role_id)) => {
                gateway
                    .add_role(guild_id, param.target_id, role_id, &param.reason)
                    .await?
            }
            (PunishmentKind::Mute, None) => {}
            (PunishmentKind::Kick, _) => {
                gateway.kick(guild_id, param.target_id, &param.reason).await?
            }
            (PunishmentKind::Ban, _) => gateway.ban(guild_id, param.target_id, &param.reason).await?,
        }

        let punishment = match self.record(&param, now, expires_at).await {
            Ok(punishment) => punishment,
            Err(e) => {
                self.undo(&param, mute_role_id).await;
                return Err(e);
            }
        };

        tracing::info!(
            "User {} {} by {}: {}",
            punishment.discord_id,
            punishment.kind.past_tense(),
            punishment.issued_by,
            punishment.reason
        );

        Ok(punishment)
    }

    /// Persists the sentence and, for timed sentences, its reversal task.
    async fn record(
        &self,
        param: &IssuePunishmentParam,
        now: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Punishment, AppError> {
        let txn = self.state.db.begin().await?;
        let punishment = PunishmentRepository::new(&txn)
            .create(
                param.kind,
                param.target_id,
                param.moderator_id,
                &param.reason,
                now,
                expires_at,
            )
            .await?;

        if let Some(expires_at) = expires_at {
            let job = match param.kind {
                PunishmentKind::Ban => ScheduledJob::Unban {
                    punishment_id: punishment.id,
                },
                _ => ScheduledJob::Unmute {
                    punishment_id: punishment.id,
                },
            };
            ScheduledTaskRepository::new(&txn)
                .schedule(&job, expires_at)
                .await?;
        }
        txn.commit().await?;

        Ok(punishment)
    }

    /// Lifts a mute or ban that was applied but could not be recorded.
    async fn undo(&self, param: &IssuePunishmentParam, mute_role_id: Option<u64>) {
        let gateway = &self.state.gateway;
        let guild_id = self.state.guild_id;
        let result = match (param.kind, mute_role_id) {
            (PunishmentKind::Mute, Some(role_id)) => {
                gateway
                    .remove_role(guild_id, param.target_id, role_id, "Sentence not recorded")
                    .await
            }
            (PunishmentKind::Ban, _) => gateway.unban(guild_id, param.target_id).await,
            (kind, _) => {
                tracing::error!(
                    "{} of user {} was applied but not recorded",
                    kind.as_str(),
                    param.target_id
                );
                return;
            }
        };

        match result {
            Ok(()) => tracing::warn!(
                "Undid {} of user {} after failing to record it",
                param.kind.as_str().to_lowercase(),
                param.target_id
            ),
            Err(e) => tracing::error!(
                "User {} remains {} without a record: {}",
                param.target_id,
                param.kind.past_tense(),
                e
            ),
        }
    }

    /// Lifts a mute or ban.
    ///
    /// # Returns
    /// - `Ok(true)` - Reversed now
    /// - `Ok(false)` - Already reversed
    /// - `Err(AppError::NotFound)` - No such punishment
    /// - `Err(AppError::BadRequest)` - Warns and kicks cannot be reversed
    pub async fn reverse(&self, punishment_id: i32) -> Result<bool, AppError> {
        let repo = PunishmentRepository::new(&self.state.db);
        let punishment = repo
            .find_by_id(punishment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Punishment {} not found", punishment_id)))?;

        if punishment.reversed {
            return Ok(false);
        }

        let guild_id = self.state.guild_id;
        match punishment.kind {
            PunishmentKind::Mute => {
                let settings = self.state.config.current()?;
                match settings.mute_role_id {
                    Some(role_id) => {
                        self.state
                            .gateway
                            .remove_role(guild_id, punishment.discord_id, role_id, "Mute expired")
                            .await?
                    }
                    None => tracing::warn!(
                        "No mute role configured; cannot unmute user {}",
                        punishment.discord_id
                    ),
                }
                notify_user(
                    self.state.gateway.as_ref(),
                    punishment.discord_id,
                    None,
                    "Your mute has been lifted.",
                )
                .await;
            }
            PunishmentKind::Ban => {
                self.state
                    .gateway
                    .unban(guild_id, punishment.discord_id)
                    .await?
            }
            kind => {
                return Err(AppError::BadRequest(format!(
                    "A {} cannot be reversed",
                    kind.as_str().to_lowercase()
                )))
            }
        }

        let reversed = repo.mark_reversed(punishment_id).await?;
        if reversed {
            tracing::info!(
                "Reversed {} of user {}",
                punishment.kind.as_str().to_lowercase(),
                punishment.discord_id
            );
        }
        Ok(reversed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bot::gateway::mock::{GatewayCall, MockGateway},
        data::scheduled_task::ScheduledTaskRepository,
        model::settings::BotSettings,
        state::test_state,
    };
    use chrono::Duration;
    use std::sync::Arc;
    use test_utils::builder::TestBuilder;

    const MUTE_ROLE: u64 = 77;
    const TARGET: u64 = 40;
    const MODERATOR: u64 = 10;

    fn settings() -> BotSettings {
        BotSettings {
            mute_role_id: Some(MUTE_ROLE),
            ..BotSettings::default()
        }
    }

    fn param(kind: PunishmentKind, duration: Option<Duration>) -> IssuePunishmentParam {
        IssuePunishmentParam {
            kind,
            target_id: TARGET,
            moderator_id: MODERATOR,
            reason: "Spamming".to_string(),
            duration,
        }
    }

    #[tokio::test]
    async fn timed_mute_applies_role_and_schedules_unmute() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let gateway = Arc::new(MockGateway::new());
        let state = test_state::build(db, gateway.clone(), settings());

        let punishment = PunishmentService::new(&state)
            .issue(param(PunishmentKind::Mute, Some(Duration::hours(1))))
            .await?;

        assert_eq!(punishment.kind, PunishmentKind::Mute);
        assert_eq!(punishment.discord_id, TARGET);
        assert!(punishment.expires_at.is_some());
        assert!(gateway.calls().contains(&GatewayCall::AddRole {
            user_id: TARGET,
            role_id: MUTE_ROLE,
        }));
        let dms = gateway.dms_to(TARGET);
        assert_eq!(dms.len(), 1);
        assert!(dms[0].starts_with("You have been muted until"));

        let due = ScheduledTaskRepository::new(db)
            .get_due(Utc::now() + Duration::hours(2))
            .await?;
        assert_eq!(due.len(), 1);
        let task = due.into_iter().next().unwrap().1?;
        assert_eq!(
            task.job,
            ScheduledJob::Unmute {
                punishment_id: punishment.id
            }
        );
        assert_eq!(
            Some(task.due_at.timestamp()),
            punishment.expires_at.map(|at| at.timestamp())
        );

        Ok(())
    }

    #[tokio::test]
    async fn permanent_ban_schedules_nothing() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let gateway = Arc::new(MockGateway::new());
        let state = test_state::build(db, gateway.clone(), settings());

        let punishment = PunishmentService::new(&state)
            .issue(param(PunishmentKind::Ban, None))
            .await?;

        assert!(punishment.expires_at.is_none());
        assert!(gateway
            .calls()
            .contains(&GatewayCall::Ban { user_id: TARGET }));
        assert!(ScheduledTaskRepository::new(db)
            .get_due(Utc::now() + Duration::days(3650))
            .await?
            .is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn sentence_stands_when_dms_are_disabled() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let gateway = Arc::new(MockGateway::new().with_dms_disabled(TARGET));
        let state = test_state::build(db, gateway.clone(), settings());

        PunishmentService::new(&state)
            .issue(param(PunishmentKind::Kick, None))
            .await?;

        assert_eq!(gateway.calls(), vec![GatewayCall::Kick { user_id: TARGET }]);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_invalid_sentences() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let gateway = Arc::new(MockGateway::new());
        let state = test_state::build(db, gateway.clone(), settings());
        let service = PunishmentService::new(&state);

        let timed_warn = service
            .issue(param(PunishmentKind::Warn, Some(Duration::hours(1))))
            .await;
        let negative = service
            .issue(param(PunishmentKind::Ban, Some(Duration::hours(-1))))
            .await;

        let unrepresentable = service
            .issue(param(
                PunishmentKind::Ban,
                Some(Duration::minutes(400_000_000_000)),
            ))
            .await;

        assert!(matches!(timed_warn, Err(AppError::BadRequest(_))));
        assert!(matches!(negative, Err(AppError::BadRequest(_))));
        assert!(matches!(unrepresentable, Err(AppError::BadRequest(_))));

        let unconfigured = test_state::build(db, gateway.clone(), BotSettings::default());
        let mute = PunishmentService::new(&unconfigured)
            .issue(param(PunishmentKind::Mute, None))
            .await;
        assert!(matches!(mute, Err(AppError::BadRequest(_))));

        assert!(gateway.calls().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn unrecorded_timed_sentences_are_lifted_again() -> Result<(), AppError> {
        // No scheduled_task table, so recording the reversal task fails.
        let test = TestBuilder::new()
            .with_table(entity::prelude::Punishment)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let gateway = Arc::new(MockGateway::new().with_dms_disabled(TARGET));
        let state = test_state::build(db, gateway.clone(), settings());
        let service = PunishmentService::new(&state);

        let mute = service
            .issue(param(PunishmentKind::Mute, Some(Duration::hours(1))))
            .await;
        let ban = service
            .issue(param(PunishmentKind::Ban, Some(Duration::hours(1))))
            .await;

        assert!(matches!(mute, Err(AppError::DbErr(_))));
        assert!(matches!(ban, Err(AppError::DbErr(_))));
        assert_eq!(
            gateway.calls(),
            vec![
                GatewayCall::AddRole {
                    user_id: TARGET,
                    role_id: MUTE_ROLE,
                },
                GatewayCall::RemoveRole {
                    user_id: TARGET,
                    role_id: MUTE_ROLE,
                },
                GatewayCall::Ban { user_id: TARGET },
                GatewayCall::Unban { user_id: TARGET },
            ]
        );
        assert!(PunishmentRepository::new(db)
            .get_by_discord_id(TARGET)
            .await?
            .is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn reverse_lifts_mute_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let gateway = Arc::new(MockGateway::new());
        let state = test_state::build(db, gateway.clone(), settings());
        let service = PunishmentService::new(&state);
        let punishment = service
            .issue(param(PunishmentKind::Mute, Some(Duration::minutes(10))))
            .await?;

        let first = service.reverse(punishment.id).await?;
        let second = service.reverse(punishment.id).await?;

        assert!(first);
        assert!(!second);
        let removals = gateway
            .calls()
            .into_iter()
            .filter(|call| {
                *call
                    == GatewayCall::RemoveRole {
                        user_id: TARGET,
                        role_id: MUTE_ROLE,
                    }
            })
            .count();
        assert_eq!(removals, 1);
        assert!(gateway
            .dms_to(TARGET)
            .contains(&"Your mute has been lifted.".to_string()));

        let history = PunishmentRepository::new(db)
            .get_by_discord_id(TARGET)
            .await?;
        assert!(history[0].reversed);

        Ok(())
    }

    #[tokio::test]
    async fn reverse_rejects_warns_and_unknown_ids() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let state = test_state::build(db, Arc::new(MockGateway::new()), settings());
        let service = PunishmentService::new(&state);
        let warn = service.issue(param(PunishmentKind::Warn, None)).await?;

        assert!(matches!(
            service.reverse(warn.id).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.reverse(9999).await,
            Err(AppError::NotFound(_))
        ));

        Ok(())
    }
}
