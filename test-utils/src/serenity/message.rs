//! Test factory for Serenity message attachments.

use serenity::all::Attachment;

use crate::factory::helpers::next_id;

/// Creates a test Attachment.
///
/// # Arguments
/// - `filename` - Attachment file name
/// - `content_type` - MIME type Discord detected, if any
///
/// # Panics
/// - If the JSON cannot be deserialized into an Attachment (indicates invalid test data)
pub fn create_test_attachment(filename: &str, content_type: Option<&str>) -> Attachment {
    let id = next_id();
    serde_json::from_value(serde_json::json!({
        "id": id.to_string(),
        "filename": filename,
        "size": 1024,
        "url": format!("https://cdn.discordapp.com/attachments/1/{}/{}", id, filename),
        "proxy_url": format!("https://media.discordapp.net/attachments/1/{}/{}", id, filename),
        "content_type": content_type,
        "height": null,
        "width": null,
        "ephemeral": false,
    }))
    .expect("Failed to create test attachment - invalid JSON structure")
}
