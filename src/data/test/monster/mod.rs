use crate::{data::monster::MonsterRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

/// Tests region and tier filtering.
///
/// Expected: only monsters from the region with tier >= 5
#[tokio::test]
async fn filters_by_region_and_min_tier() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Monster)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_monster(db, "Eldin", 3).await?;
    let strong = factory::create_monster(db, "Eldin", 5).await?;
    let stronger = factory::create_monster(db, "Eldin", 8).await?;
    factory::create_monster(db, "Faron", 9).await?;

    let repo = MonsterRepository::new(db);
    let monsters = repo.get_by_region_min_tier("Eldin", 5).await?;

    let ids: Vec<i32> = monsters.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![strong.id, stronger.id]);

    Ok(())
}

/// Tests a region with no eligible monsters.
///
/// Expected: Ok with empty vec
#[tokio::test]
async fn returns_empty_for_unknown_region() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Monster)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_monster(db, "Eldin", 6).await?;

    let repo = MonsterRepository::new(db);
    assert!(repo.get_by_region_min_tier("Lanayru", 5).await?.is_empty());

    Ok(())
}
