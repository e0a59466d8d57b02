use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::{
    data::guild_event::GuildEventRepository, error::AppError,
    model::guild_event::CreateGuildEventParam,
};

/// Tests creating an event and attaching its announcement.
///
/// Expected: Ok with expiry derived from the duration and the message id stored
#[tokio::test]
async fn creates_event_and_sets_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = GuildEventRepository::new(db);
    let now = Utc::now();

    let event = repo
        .create(
            &CreateGuildEventParam {
                name: "Beach Day".to_string(),
                channel_id: 5,
                points: 20,
                duration: Duration::hours(3),
                max_claims: Some(10),
                created_by: 10,
            },
            now,
        )
        .await?;
    repo.set_message_id(event.id, 8080).await?;

    let stored = repo.find_by_id(event.id).await?.unwrap();
    assert_eq!(stored.expires, now + Duration::hours(3));
    assert_eq!(stored.message_id, Some(8080));
    assert_eq!(stored.max_claims, Some(10));
    assert!(matches!(
        repo.set_message_id(9999, 1).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests that a user can claim an event only once.
///
/// Expected: Ok(true), then Ok(false), and one counted claim per user
#[tokio::test]
async fn claims_are_unique_per_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let event = factory::guild_event::create_guild_event(db).await?;
    let repo = GuildEventRepository::new(db);

    assert!(repo.create_claim(event.id, 42, Utc::now()).await?);
    assert!(!repo.create_claim(event.id, 42, Utc::now()).await?);
    assert!(repo.create_claim(event.id, 43, Utc::now()).await?);

    assert_eq!(repo.count_claims(event.id).await?, 2);

    Ok(())
}
