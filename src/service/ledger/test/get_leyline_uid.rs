use super::*;

/// Tests resolving linked and unlinked Discord users.
///
/// Expected: Some(uid) for the linked user, None otherwise
#[tokio::test]
async fn resolves_linked_users_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let account = factory::leyline_user::create_linked_user(db, 42).await?;
    let mint_queue = MintQueue::disabled();
    let ledger = RewardLedgerService::new(db, &mint_queue);

    assert_eq!(ledger.get_leyline_uid(42).await?, Some(account.uid));
    assert_eq!(ledger.get_leyline_uid(43).await?, None);
    assert!(ledger.is_user_connected_to_leyline(42).await?);
    assert!(!ledger.is_user_connected_to_leyline(43).await?);

    Ok(())
}
