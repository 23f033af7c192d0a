use crate::{data::raid::RaidRepository, error::AppError, model::encounter::CreateRaidParam};
use chrono::{TimeZone, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::builder::TestBuilder;

fn raid(village: &str, channel_id: u64, is_automated: bool) -> CreateRaidParam {
    CreateRaidParam {
        monster_name: "Moblin Chieftain".to_string(),
        monster_tier: 6,
        village: village.to_string(),
        channel_id,
        is_automated,
        created_at: Utc.with_ymd_and_hms(2026, 6, 14, 18, 30, 0).unwrap(),
    }
}

/// Tests creating a raid record.
///
/// Verifies every parameter is stored and the returned model matches what a fresh
/// read finds.
///
/// Expected: Ok with a generated ID and the stored row equal to the returned model
#[tokio::test]
async fn creates_raid_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Raid)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidRepository::new(db);
    let created = repo.create(raid("Rudania", 1234567890123, true)).await?;

    assert_eq!(created.monster_name, "Moblin Chieftain");
    assert_eq!(created.monster_tier, 6);
    assert_eq!(created.village, "Rudania");
    assert_eq!(created.channel_id, "1234567890123");
    assert!(created.is_automated);
    assert_eq!(
        created.created_at,
        Utc.with_ymd_and_hms(2026, 6, 14, 18, 30, 0).unwrap()
    );

    let stored = entity::prelude::Raid::find_by_id(created.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored, created);

    Ok(())
}

/// Tests creating several raids.
///
/// Expected: one row per call with distinct IDs
#[tokio::test]
async fn assigns_distinct_ids() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Raid)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidRepository::new(db);
    let first = repo.create(raid("Rudania", 111, true)).await?;
    let second = repo.create(raid("Inariko", 222, false)).await?;

    assert_ne!(first.id, second.id);
    assert!(!second.is_automated);

    let count = entity::prelude::Raid::find().count(db).await?;
    assert_eq!(count, 2);

    Ok(())
}
