use super::*;

/// Tests releasing a claimed announcement.
///
/// Verifies the record is removed so the same key can be claimed again.
///
/// Expected: Ok(true), then Recorded on the next claim
#[tokio::test]
async fn releases_claim_for_retry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AnnouncementRepository::new(db);
    repo.record_sent(7, AnnouncementType::Start, "2026-06-14", Utc::now())
        .await?;

    let released = repo
        .release(7, AnnouncementType::Start, "2026-06-14")
        .await?;

    assert!(released);
    assert!(
        !repo
            .has_been_sent(7, AnnouncementType::Start, "2026-06-14")
            .await?
    );

    let outcome = repo
        .record_sent(7, AnnouncementType::Start, "2026-06-14", Utc::now())
        .await?;
    assert_eq!(outcome, RecordOutcome::Recorded);

    Ok(())
}

/// Tests releasing only the matching key.
///
/// Verifies records for other types, days and channels are left in place.
///
/// Expected: Ok(false) for an unknown key, other records untouched
#[tokio::test]
async fn leaves_other_keys_untouched() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_announcement_record(db, "7", "start", "2026-06-14").await?;
    factory::create_announcement_record(db, "7", "end", "2026-06-17").await?;
    factory::create_announcement_record(db, "8", "start", "2026-06-14").await?;

    let repo = AnnouncementRepository::new(db);
    let released = repo
        .release(7, AnnouncementType::Start, "2026-06-15")
        .await?;
    assert!(!released);

    repo.release(7, AnnouncementType::Start, "2026-06-14")
        .await?;

    let count = entity::prelude::AnnouncementRecord::find().count(db).await?;
    assert_eq!(count, 2);
    assert!(
        repo.has_been_sent(7, AnnouncementType::End, "2026-06-17")
            .await?
    );
    assert!(
        repo.has_been_sent(8, AnnouncementType::Start, "2026-06-14")
            .await?
    );

    Ok(())
}
