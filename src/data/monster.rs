use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::model::encounter::Monster;

pub struct MonsterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MonsterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all monsters native to a region at or above a tier.
    ///
    /// # Arguments
    /// - `region` - Region name, matched exactly
    /// - `min_tier` - Inclusive lower bound on tier
    ///
    /// # Returns
    /// - `Ok(Vec<Monster>)` - Matching monsters ordered by tier then id; may be empty
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_region_min_tier(
        &self,
        region: &str,
        min_tier: i32,
    ) -> Result<Vec<Monster>, DbErr> {
        let monsters = entity::prelude::Monster::find()
            .filter(entity::monster::Column::Region.eq(region))
            .filter(entity::monster::Column::Tier.gte(min_tier))
            .order_by_asc(entity::monster::Column::Tier)
            .order_by_asc(entity::monster::Column::Id)
            .all(self.db)
            .await?;

        Ok(monsters.into_iter().map(Monster::from_entity).collect())
    }
}
