use super::*;

/// Tests recording a new announcement and reading it back.
///
/// Expected: Recorded, then has_been_sent true for the same key and false for another day
#[tokio::test]
async fn records_then_reports_sent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AnnouncementRepository::new(db);
    let outcome = repo
        .record_sent(123, AnnouncementType::Start, "2026-06-14", Utc::now())
        .await?;

    assert_eq!(outcome, RecordOutcome::Recorded);
    assert!(
        repo.has_been_sent(123, AnnouncementType::Start, "2026-06-14")
            .await?
    );
    assert!(
        !repo
            .has_been_sent(123, AnnouncementType::Start, "2026-06-13")
            .await?
    );

    Ok(())
}

/// Tests recording the same key twice.
///
/// Verifies the second insert is absorbed by the uniqueness constraint rather than
/// producing an error or a second row.
///
/// Expected: AlreadyExists with exactly one stored row
#[tokio::test]
async fn second_record_for_same_key_is_absorbed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AnnouncementRepository::new(db);
    let first_sent = Utc.with_ymd_and_hms(2026, 6, 15, 0, 0, 0).unwrap();
    repo.record_sent(123, AnnouncementType::Start, "2026-06-14", first_sent)
        .await?;

    let outcome = repo
        .record_sent(
            123,
            AnnouncementType::Start,
            "2026-06-14",
            first_sent + Duration::minutes(1),
        )
        .await?;

    assert_eq!(outcome, RecordOutcome::AlreadyExists);

    let count = entity::prelude::AnnouncementRecord::find().count(db).await?;
    assert_eq!(count, 1);

    // The original sent_at is preserved
    let stored = entity::prelude::AnnouncementRecord::find()
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.sent_at, first_sent);

    Ok(())
}

/// Tests that start and end announcements for the same channel and day are distinct keys.
///
/// Expected: both Recorded
#[tokio::test]
async fn start_and_end_are_separate_keys() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AnnouncementRepository::new(db);
    let now = Utc::now();

    let start = repo
        .record_sent(123, AnnouncementType::Start, "2026-06-17", now)
        .await?;
    let end = repo
        .record_sent(123, AnnouncementType::End, "2026-06-17", now)
        .await?;

    assert_eq!(start, RecordOutcome::Recorded);
    assert_eq!(end, RecordOutcome::Recorded);

    Ok(())
}
