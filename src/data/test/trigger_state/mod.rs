use crate::{data::trigger_state::TriggerStateRepository, error::AppError};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::builder::TestBuilder;

/// Tests reading state that was never written.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_never_triggered() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TriggerState)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TriggerStateRepository::new(db);
    assert_eq!(repo.get_last_triggered("raid_encounter").await?, None);

    Ok(())
}

/// Tests that setting twice overwrites rather than duplicating.
///
/// Expected: latest value returned and a single row stored
#[tokio::test]
async fn overwrites_previous_value() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TriggerState)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TriggerStateRepository::new(db);
    let first = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
    let second = first + Duration::hours(5);

    repo.set_last_triggered("raid_encounter", first).await?;
    repo.set_last_triggered("raid_encounter", second).await?;

    assert_eq!(
        repo.get_last_triggered("raid_encounter").await?,
        Some(second)
    );
    assert_eq!(entity::prelude::TriggerState::find().count(db).await?, 1);

    Ok(())
}
