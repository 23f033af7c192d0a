use super::*;

/// Tests lookup on an empty table.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_no_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AnnouncementRepository::new(db);
    let sent = repo
        .has_been_sent(123, AnnouncementType::Start, "2026-06-14")
        .await?;

    assert!(!sent);

    Ok(())
}

/// Tests lookup of an existing key.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_for_existing_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_announcement_record(db, "123", "start", "2026-06-14").await?;

    let repo = AnnouncementRepository::new(db);
    assert!(
        repo.has_been_sent(123, AnnouncementType::Start, "2026-06-14")
            .await?
    );

    Ok(())
}

/// Tests that every part of the key must match.
///
/// A record for (123, start, 2026-06-14) must not satisfy lookups that differ in
/// channel, type or day.
///
/// Expected: Ok(false) for each differing key
#[tokio::test]
async fn matches_whole_key_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_announcement_record(db, "123", "start", "2026-06-14").await?;

    let repo = AnnouncementRepository::new(db);
    assert!(
        !repo
            .has_been_sent(456, AnnouncementType::Start, "2026-06-14")
            .await?
    );
    assert!(
        !repo
            .has_been_sent(123, AnnouncementType::End, "2026-06-14")
            .await?
    );
    assert!(
        !repo
            .has_been_sent(123, AnnouncementType::Start, "2026-06-15")
            .await?
    );

    Ok(())
}
