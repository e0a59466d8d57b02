use serenity::all::Reaction;

use crate::{model::reaction_collector::ReactionEvent, state::AppState};

/// Forwards a reaction to the collector bound to its message, if any.
pub async fn handle_reaction_add(state: &AppState, reaction: Reaction) {
    let Some(event) = to_event(&reaction) else {
        return;
    };

    if !state.collectors.dispatch(event) {
        tracing::trace!("Reaction on untracked message {}", reaction.message_id);
    }
}

fn to_event(reaction: &Reaction) -> Option<ReactionEvent> {
    Some(ReactionEvent {
        message_id: reaction.message_id.get(),
        channel_id: reaction.channel_id.get(),
        guild_id: reaction.guild_id.map(|id| id.get()),
        user_id: reaction.user_id?.get(),
        emoji: reaction.emoji.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use test_utils::serenity::reaction::create_test_reaction;

    #[test]
    fn converts_unicode_reaction() {
        let reaction = create_test_reaction(10, 20, 30, "🌱");
        let event = to_event(&reaction).unwrap();

        assert_eq!(event.message_id, 10);
        assert_eq!(event.channel_id, 20);
        assert_eq!(event.user_id, 30);
        assert_eq!(event.emoji, "🌱");
    }

    #[tokio::test]
    async fn routes_to_registered_collector() {
        let registry = crate::service::reaction_collector::registry::CollectorRegistry::new();
        let mut events = registry.register(10);

        let event = to_event(&create_test_reaction(10, 20, 30, "🌱")).unwrap();
        assert!(registry.dispatch(event.clone()));
        assert_eq!(events.next().await, Some(event));
    }
}
