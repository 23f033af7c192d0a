use super::*;
use test_utils::factory::announcement_record::AnnouncementRecordFactory;

/// Tests the retention sweep.
///
/// Verifies records older than the retention window are deleted while recent ones
/// survive.
///
/// Expected: Ok(1) with only the recent record remaining
#[tokio::test]
async fn deletes_records_past_retention() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 7, 30, 12, 0, 0).unwrap();

    AnnouncementRecordFactory::new(db, "1", "start", "2026-06-14")
        .sent_at(now - Duration::days(46))
        .build()
        .await?;
    AnnouncementRecordFactory::new(db, "1", "end", "2026-07-25")
        .sent_at(now - Duration::days(5))
        .build()
        .await?;

    let repo = AnnouncementRepository::new(db);
    let deleted = repo.cleanup(Duration::days(30), now).await?;

    assert_eq!(deleted, 1);
    assert!(
        !repo
            .has_been_sent(1, AnnouncementType::Start, "2026-06-14")
            .await?
    );
    assert!(
        repo.has_been_sent(1, AnnouncementType::End, "2026-07-25")
            .await?
    );

    Ok(())
}

/// Tests the sweep on a table with nothing to delete.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_when_nothing_expired() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_announcement_record(db, "1", "start", "2026-06-14").await?;

    let repo = AnnouncementRepository::new(db);
    let deleted = repo.cleanup(Duration::days(30), Utc::now()).await?;

    assert_eq!(deleted, 0);

    Ok(())
}

/// Tests a retention longer than the representable time range.
///
/// The cutoff would precede the earliest representable instant, so no record is old
/// enough to delete.
///
/// Expected: Ok(0) with the record kept
#[tokio::test]
async fn keeps_everything_when_retention_exceeds_time_range() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_announcement_record(db, "1", "start", "2026-06-14").await?;

    let repo = AnnouncementRepository::new(db);
    let deleted = repo.cleanup(Duration::MAX, Utc::now()).await?;

    assert_eq!(deleted, 0);
    assert!(
        repo.has_been_sent(1, AnnouncementType::Start, "2026-06-14")
            .await?
    );

    Ok(())
}
