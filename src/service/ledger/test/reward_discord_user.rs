use super::*;

/// Tests rewarding a linked Discord user.
///
/// Expected: Ok(Awarded) with the entry on the linked account
#[tokio::test]
async fn awards_linked_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let account = factory::leyline_user::create_linked_user(db, 42).await?;
    let mint_queue = MintQueue::disabled();

    let reward = RewardLedgerService::new(db, &mint_queue)
        .reward_discord_user(42, 15, PointsMetadata::new("Level Up", "Reached level 2"))
        .await?;

    let DiscordReward::Awarded(entry) = reward else {
        panic!("expected an award, got {:?}", reward);
    };
    assert_eq!(entry.uid, account.uid);
    assert_eq!(entry.leyline_points, 15);
    assert_eq!(total_points(db, &account.uid).await, 15);

    Ok(())
}

/// Tests rewarding a Discord user with no linked account.
///
/// Expected: Ok(NotLinked) and no entry written
#[tokio::test]
async fn reports_unlinked_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let other = factory::leyline_user::create_linked_user(db, 42).await?;
    let mint_queue = MintQueue::disabled();
    let ledger = RewardLedgerService::new(db, &mint_queue);

    let reward = ledger
        .reward_discord_user(7, 15, PointsMetadata::new("Good Acts", "x"))
        .await?;

    assert_eq!(reward, DiscordReward::NotLinked);
    assert!(ledger.get_entries(&other.uid).await?.is_empty());

    Ok(())
}
