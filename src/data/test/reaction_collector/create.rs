use super::*;

/// Tests creating a pending record for a submission.
///
/// Expected: Ok with a pending, unapproved record
#[tokio::test]
async fn creates_pending_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let expires = Utc::now() + Duration::hours(168);

    let record = ReactionCollectorRepository::new(db)
        .create(CreateCollectorParam {
            message_id: 1001,
            collector_type: CollectorType::KindWords,
            channel_id: 2,
            author_id: 20,
            expires,
        })
        .await?;

    assert_eq!(record.message_id, 1001);
    assert_eq!(record.collector_type, CollectorType::KindWords);
    assert_eq!(record.author_id, 20);
    assert!(!record.approved);
    assert!(record.approved_by.is_none());
    assert_eq!(record.state_at(Utc::now()), CollectorState::PendingApproval);

    Ok(())
}

/// Tests that creating a record for an already tracked message keeps the stored
/// one.
///
/// Expected: Ok with the original record, including its approval
#[tokio::test]
async fn returns_existing_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(1002)
        .author_id(20)
        .approved_by(10)
        .build()
        .await?;

    let record = ReactionCollectorRepository::new(db)
        .create(CreateCollectorParam {
            message_id: 1002,
            collector_type: CollectorType::GoodActs,
            channel_id: 1,
            author_id: 99,
            expires: Utc::now() + Duration::hours(1),
        })
        .await?;

    assert!(record.approved);
    assert_eq!(record.author_id, 20);
    assert_eq!(record.approved_by, Some(10));

    Ok(())
}

/// Tests that a record with an unknown type tag fails to load.
///
/// Expected: Err(InternalErr)
#[tokio::test]
async fn malformed_type_fails_to_load() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(1003)
        .collector_type("MEMES")
        .build()
        .await?;

    let result = ReactionCollectorRepository::new(db)
        .find_by_message_id(1003)
        .await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
