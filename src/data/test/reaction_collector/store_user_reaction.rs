use super::*;

/// Tests storing a reaction receipt.
///
/// Expected: Ok(true) first, Ok(false) for the same user again
#[tokio::test]
async fn stores_receipt_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(4001)
        .build()
        .await?;
    let repo = ReactionCollectorRepository::new(db);

    assert!(repo.store_user_reaction(4001, 30, Utc::now()).await?);
    assert!(!repo.store_user_reaction(4001, 30, Utc::now()).await?);
    assert!(repo.store_user_reaction(4001, 31, Utc::now()).await?);

    let users: Vec<u64> = repo
        .get_reacted_users(4001)
        .await?
        .into_iter()
        .map(|user| user.user_id)
        .collect();
    assert_eq!(users, vec![30, 31]);

    Ok(())
}

/// Tests that receipts are scoped to their message.
///
/// Expected: Ok with one receipt per message
#[tokio::test]
async fn receipts_are_per_message() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    for message_id in [4002, 4003] {
        factory::reaction_collector::ReactionCollectorFactory::new(db)
            .message_id(message_id)
            .build()
            .await?;
    }
    let repo = ReactionCollectorRepository::new(db);

    assert!(repo.store_user_reaction(4002, 30, Utc::now()).await?);
    assert!(repo.store_user_reaction(4003, 30, Utc::now()).await?);

    assert_eq!(repo.get_reacted_users(4002).await?.len(), 1);
    assert_eq!(repo.get_reacted_users(4003).await?.len(), 1);

    Ok(())
}
