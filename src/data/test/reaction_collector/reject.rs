use super::*;

/// Tests rejecting a pending record.
///
/// Expected: Ok(true) and the record reads as Rejected
#[tokio::test]
async fn rejects_pending_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(3001)
        .build()
        .await?;
    let repo = ReactionCollectorRepository::new(db);
    let now = Utc::now();

    assert!(repo.reject(3001, 10, now).await?);

    let record = repo.find_by_message_id(3001).await?.unwrap();
    assert_eq!(record.rejected_by, Some(10));
    assert_eq!(record.expires, now);
    assert_eq!(record.state_at(now), CollectorState::Rejected);

    Ok(())
}

/// Tests that an approved record cannot be rejected afterwards.
///
/// Expected: Ok(false) and the approval stands
#[tokio::test]
async fn cannot_reject_approved_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(3002)
        .approved_by(10)
        .build()
        .await?;
    let repo = ReactionCollectorRepository::new(db);

    assert!(!repo.reject(3002, 11, Utc::now()).await?);

    let record = repo.find_by_message_id(3002).await?.unwrap();
    assert!(record.rejected_by.is_none());
    assert_eq!(record.state_at(Utc::now()), CollectorState::ApprovedOpen);

    Ok(())
}
