//! Change feed over the document store.
//!
//! Writers publish a [`DocumentChange`] after committing a watched document;
//! readers subscribe to one collection and receive its deltas as a stream. This
//! is how the configuration cache stays current without polling on every read.

use futures::{Stream, StreamExt};
use serde_json::Value;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

const FEED_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    pub collection: String,
    pub id: String,
    pub kind: ChangeKind,
    /// Document body after the change; `None` for removals.
    pub data: Option<Value>,
}

impl DocumentChange {
    pub fn new(collection: &str, id: &str, kind: ChangeKind, data: Option<Value>) -> Self {
        Self {
            collection: collection.to_string(),
            id: id.to_string(),
            kind,
            data,
        }
    }
}

#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<DocumentChange>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Publishes a change; having no subscribers is not an error.
    pub fn publish(&self, change: DocumentChange) {
        let _ = self.tx.send(change);
    }

    /// Subscribes to the deltas of one collection.
    ///
    /// A subscriber that falls behind skips the missed deltas with a warning; every
    /// consumer in this crate treats the latest delta as authoritative.
    pub fn subscribe(&self, collection: &str) -> impl Stream<Item = DocumentChange> + Send + 'static {
        let collection = collection.to_string();
        BroadcastStream::new(self.tx.subscribe()).filter_map(move |item| {
            let change = match item {
                Ok(change) if change.collection == collection => Some(change),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Change feed subscriber for {} lagged: {}", collection, e);
                    None
                }
            };
            futures::future::ready(change)
        })
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_only_subscribed_collection() {
        let feed = ChangeFeed::new();
        let mut stream = Box::pin(feed.subscribe("bot_config"));

        feed.publish(DocumentChange::new("reaction_collector", "1", ChangeKind::Added, None));
        feed.publish(DocumentChange::new(
            "bot_config",
            "bot",
            ChangeKind::Modified,
            Some(serde_json::json!({"a": 1})),
        ));

        let change = stream.next().await.unwrap();
        assert_eq!(change.collection, "bot_config");
        assert_eq!(change.kind, ChangeKind::Modified);
    }
}
