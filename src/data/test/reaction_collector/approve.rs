use super::*;

/// Tests approving a pending record.
///
/// Expected: Ok(true) with approval fields and the new expiry stored
#[tokio::test]
async fn approves_pending_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(2001)
        .build()
        .await?;
    let repo = ReactionCollectorRepository::new(db);
    let param = approve_param(2001, 10);

    let approved = repo.approve(param.clone()).await?;

    assert!(approved);
    let record = repo.find_by_message_id(2001).await?.unwrap();
    assert!(record.approved);
    assert_eq!(record.approved_by, Some(10));
    assert_eq!(record.expires, param.expires);
    assert_eq!(record.keyword(), Some("Environment"));

    Ok(())
}

/// Tests that only the first approval wins.
///
/// Expected: Ok(false) for the second approval, first approver kept
#[tokio::test]
async fn second_approval_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(2002)
        .build()
        .await?;
    let repo = ReactionCollectorRepository::new(db);

    assert!(repo.approve(approve_param(2002, 10)).await?);
    assert!(!repo.approve(approve_param(2002, 11)).await?);

    let record = repo.find_by_message_id(2002).await?.unwrap();
    assert_eq!(record.approved_by, Some(10));

    Ok(())
}

/// Tests that a rejected or missing record cannot be approved.
///
/// Expected: Ok(false)
#[tokio::test]
async fn cannot_approve_rejected_or_missing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(2003)
        .rejected_by(10)
        .build()
        .await?;
    let repo = ReactionCollectorRepository::new(db);

    assert!(!repo.approve(approve_param(2003, 11)).await?);
    assert!(!repo.approve(approve_param(2999, 11)).await?);
    assert!(!repo.find_by_message_id(2003).await?.unwrap().approved);

    Ok(())
}
