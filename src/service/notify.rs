//! User notifications with a public fallback.
//!
//! Direct messages fail when a user has them disabled. Anything the user must see
//! (how to link an account, a sentence) is then posted in a channel with a mention
//! instead.

use crate::bot::gateway::ChatGateway;

/// How a notification reached the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Direct,
    Channel,
    Failed,
}

/// DMs `user_id`, falling back to a mention in `fallback_channel_id`.
///
/// Failures are logged and never returned.
pub async fn notify_user(
    gateway: &dyn ChatGateway,
    user_id: u64,
    fallback_channel_id: Option<u64>,
    content: &str,
) -> Delivery {
    let dm_err = match gateway.send_dm(user_id, content).await {
        Ok(()) => return Delivery::Direct,
        Err(e) => e,
    };

    let Some(channel_id) = fallback_channel_id else {
        tracing::warn!("Could not DM user {}: {}", user_id, dm_err);
        return Delivery::Failed;
    };

    tracing::debug!(
        "DM to user {} failed ({}); posting in channel {}",
        user_id,
        dm_err,
        channel_id
    );

    let content = format!("<@{}> {}", user_id, content);
    match gateway.send_message(channel_id, &content).await {
        Ok(_) => Delivery::Channel,
        Err(e) => {
            tracing::warn!(
                "Could not notify user {} by DM or in channel {}: {}",
                user_id,
                channel_id,
                e
            );
            Delivery::Failed
        }
    }
}

/// Explains how to link an account to receive rewards.
pub fn unlinked_message(connect_url: &str, reason: &str) -> String {
    format!(
        "You would have earned Leyline Points for {}, but your Discord account is not connected to Leyline. Connect it here to start earning: {}",
        reason, connect_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::gateway::mock::{GatewayCall, MockGateway};

    #[tokio::test]
    async fn prefers_direct_message() {
        let gateway = MockGateway::new();
        let delivery = notify_user(&gateway, 1, Some(10), "hello").await;

        assert_eq!(delivery, Delivery::Direct);
        assert_eq!(gateway.dms_to(1), vec!["hello".to_string()]);
        assert!(gateway.messages_to(10).is_empty());
    }

    #[tokio::test]
    async fn falls_back_to_channel_mention() {
        let gateway = MockGateway::new().with_dms_disabled(1);
        let delivery = notify_user(&gateway, 1, Some(10), "hello").await;

        assert_eq!(delivery, Delivery::Channel);
        assert_eq!(gateway.messages_to(10), vec!["<@1> hello".to_string()]);
    }

    #[tokio::test]
    async fn reports_failure_without_fallback() {
        let gateway = MockGateway::new().with_dms_disabled(1);
        let delivery = notify_user(&gateway, 1, None, "hello").await;

        assert_eq!(delivery, Delivery::Failed);
        assert!(!gateway
            .calls()
            .iter()
            .any(|call| matches!(call, GatewayCall::SendMessage { .. })));
    }
}
