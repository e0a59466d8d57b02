//! Test factory for Serenity reaction events.

use serenity::all::Reaction;

/// Creates a test Reaction with a unicode emoji, as sent for MESSAGE_REACTION_ADD.
///
/// # Arguments
/// - `message_id` - Message reacted to
/// - `channel_id` - Channel of the message
/// - `user_id` - Reacting user
/// - `emoji` - Unicode emoji
///
/// # Panics
/// - If the JSON cannot be deserialized into a Reaction (indicates invalid test data)
pub fn create_test_reaction(message_id: u64, channel_id: u64, user_id: u64, emoji: &str) -> Reaction {
    serde_json::from_value(serde_json::json!({
        "message_id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "user_id": user_id.to_string(),
        "emoji": { "id": null, "name": emoji },
        "burst": false,
        "burst_colors": [],
        "type": 0,
    }))
    .expect("Failed to create test reaction - invalid JSON structure")
}
