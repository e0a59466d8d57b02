use super::*;

/// Tests that only unexpired, unrejected records are active.
///
/// Expected: Ok with the pending and approved records, oldest first
#[tokio::test]
async fn returns_open_records_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(5001)
        .build()
        .await?;
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(5002)
        .approved_by(10)
        .build()
        .await?;
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(5003)
        .expires(now - Duration::minutes(1))
        .build()
        .await?;
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(5004)
        .rejected_by(10)
        .build()
        .await?;

    let active = ReactionCollectorRepository::new(db).get_active(now).await?;

    let ids: Vec<&str> = active.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["5001", "5002"]);
    assert!(active.iter().all(|(_, record)| record.is_ok()));

    Ok(())
}

/// Tests that a malformed record is returned as an error entry, not a failure of
/// the whole query.
///
/// Expected: Ok with one Err entry alongside the valid record
#[tokio::test]
async fn reports_malformed_records_individually() -> Result<(), AppError> {
    let test = TestBuilder::new().with_collector_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(5005)
        .collector_type("MEMES")
        .build()
        .await?;
    factory::reaction_collector::ReactionCollectorFactory::new(db)
        .message_id(5006)
        .build()
        .await?;

    let active = ReactionCollectorRepository::new(db)
        .get_active(Utc::now())
        .await?;

    assert_eq!(active.len(), 2);
    assert!(active[0].1.is_err());
    assert_eq!(active[1].1.as_ref().unwrap().message_id, 5006);

    Ok(())
}
