//! Routes reaction events to the live collector bound to their message.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::model::reaction_collector::ReactionEvent;

#[derive(Clone, Default)]
pub struct CollectorRegistry {
    senders: Arc<Mutex<HashMap<u64, mpsc::UnboundedSender<ReactionEvent>>>>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collector for `message_id` and returns its event stream.
    ///
    /// Registering the same message again replaces the previous route; the old
    /// stream ends, which stops the collector that was reading it.
    pub fn register(&self, message_id: u64) -> UnboundedReceiverStream<ReactionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().insert(message_id, tx);
        UnboundedReceiverStream::new(rx)
    }

    /// Forwards a reaction to its collector.
    ///
    /// # Returns
    /// - `true` - A live collector received the event
    /// - `false` - The message is not tracked
    pub fn dispatch(&self, event: ReactionEvent) -> bool {
        let mut senders = self.lock();
        let Some(tx) = senders.get(&event.message_id) else {
            return false;
        };

        let message_id = event.message_id;
        if tx.send(event).is_err() {
            senders.remove(&message_id);
            return false;
        }
        true
    }

    pub fn remove(&self, message_id: u64) {
        self.lock().remove(&message_id);
    }

    pub fn is_tracking(&self, message_id: u64) -> bool {
        self.lock()
            .get(&message_id)
            .is_some_and(|tx| !tx.is_closed())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, mpsc::UnboundedSender<ReactionEvent>>> {
        // A poisoned map only means a panic mid-insert; the map itself is still usable.
        self.senders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn event(message_id: u64) -> ReactionEvent {
        ReactionEvent {
            message_id,
            channel_id: 1,
            guild_id: None,
            user_id: 7,
            emoji: "👍".to_string(),
        }
    }

    #[tokio::test]
    async fn dispatches_to_registered_collector() {
        let registry = CollectorRegistry::new();
        let mut stream = registry.register(5);

        assert!(registry.dispatch(event(5)));
        assert!(!registry.dispatch(event(6)));
        assert_eq!(stream.next().await, Some(event(5)));
    }

    #[tokio::test]
    async fn drops_route_when_collector_is_gone() {
        let registry = CollectorRegistry::new();
        let stream = registry.register(5);
        drop(stream);

        assert!(!registry.is_tracking(5));
        assert!(!registry.dispatch(event(5)));
        assert!(registry.is_empty());
    }
}
