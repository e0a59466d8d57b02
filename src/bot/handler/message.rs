//! Message handler: XP for every guild message, collectors for submissions.

use chrono::Utc;
use serenity::all::{Attachment, Message};

use crate::{
    model::{reaction_collector::CollectorType, settings::BotSettings},
    service::{
        reaction_collector::{CollectorService, Submission},
        xp::XpService,
    },
    state::AppState,
};

/// Handles a new message in any channel the bot can see.
pub async fn handle_message(state: &AppState, message: Message) {
    if message.author.bot || message.guild_id.is_none() {
        return;
    }

    let author_id = message.author.id.get();
    let channel_id = message.channel_id.get();

    if let Err(e) = XpService::new(state)
        .award_message_xp(author_id, channel_id, Utc::now())
        .await
    {
        tracing::error!("Failed to award XP to {}: {}", author_id, e);
    }

    let settings = match state.config.current() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Ignoring message {}: {}", message.id, e);
            return;
        }
    };

    let has_media = message.attachments.iter().any(is_media);
    let has_text = !message.content.trim().is_empty();
    let Some(collector_type) = classify_submission(&settings, channel_id, has_media, has_text)
    else {
        return;
    };

    let submission = Submission {
        message_id: message.id.get(),
        channel_id,
        author_id,
    };
    if let Err(e) = CollectorService::new(state)
        .create(submission, collector_type)
        .await
    {
        tracing::error!(
            "Failed to start {} collector on {}: {}",
            collector_type.label(),
            message.id,
            e
        );
    }
}

fn is_media(attachment: &Attachment) -> bool {
    attachment
        .content_type
        .as_deref()
        .is_some_and(|content_type| {
            content_type.starts_with("image/") || content_type.starts_with("video/")
        })
}

/// Decides which collector, if any, a message in `channel_id` should get.
///
/// Good Acts channels take media posts, Kind Words channels take text posts.
pub fn classify_submission(
    settings: &BotSettings,
    channel_id: u64,
    has_media: bool,
    has_text: bool,
) -> Option<CollectorType> {
    if has_media && settings.good_acts.channel_ids.contains(&channel_id) {
        return Some(CollectorType::GoodActs);
    }
    if has_text && settings.kind_words.channel_ids.contains(&channel_id) {
        return Some(CollectorType::KindWords);
    }
    None
}
