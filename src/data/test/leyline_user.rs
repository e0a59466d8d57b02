use sea_orm::TransactionTrait;
use test_utils::{builder::TestBuilder, factory};

use crate::{data::leyline_user::LeylineUserRepository, error::AppError};

/// Tests looking up an account by Discord id.
///
/// Expected: Some for the linked user, None otherwise
#[tokio::test]
async fn finds_by_discord_id() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let account = factory::leyline_user::LeylineUserFactory::new(db)
        .discord_id(42)
        .username("ada")
        .build()
        .await?;
    let repo = LeylineUserRepository::new(db);

    let found = repo.find_by_discord_id(42).await?.unwrap();

    assert_eq!(found.uid, account.uid);
    assert_eq!(found.username, "ada");
    assert!(repo.find_by_discord_id(43).await?.is_none());

    Ok(())
}

/// Tests linking a new account.
///
/// Expected: Ok with a zero balance, found by uid afterwards
#[tokio::test]
async fn links_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = LeylineUserRepository::new(db);

    let account = repo.link("uid-ada", 42, "ada").await?;

    assert_eq!(account.total_points, 0);
    assert_eq!(repo.find_by_uid("uid-ada").await?, Some(account));

    Ok(())
}

/// Tests balance updates inside and outside a transaction.
///
/// Expected: committed increments persist, a rolled back one does not, and an
/// unknown uid reports false
#[tokio::test]
async fn add_points_updates_balance() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let account = factory::leyline_user::create_linked_user(db, 42).await?;

    assert!(LeylineUserRepository::new(db).add_points(&account.uid, 10).await?);

    let txn = db.begin().await?;
    assert!(LeylineUserRepository::new(&txn).add_points(&account.uid, 5).await?);
    txn.rollback().await?;

    let repo = LeylineUserRepository::new(db);
    assert!(!repo.add_points("uid-missing", 5).await?);
    assert_eq!(repo.find_by_uid(&account.uid).await?.unwrap().total_points, 10);

    Ok(())
}
