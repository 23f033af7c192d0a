use async_trait::async_trait;
use rand::seq::IndexedRandom;
use sea_orm::DatabaseConnection;

use crate::{
    data::monster::MonsterRepository, error::external::ExternalError, model::encounter::Monster,
    service::encounter::MonsterCatalog,
};

/// Monster catalog backed by the `monster` table.
pub struct DatabaseMonsterCatalog {
    db: DatabaseConnection,
}

impl DatabaseMonsterCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MonsterCatalog for DatabaseMonsterCatalog {
    /// Picks one eligible monster at random so repeated raids on a region vary.
    async fn get_above_tier_by_region(
        &self,
        min_tier: i32,
        region: &str,
    ) -> Result<Option<Monster>, ExternalError> {
        let repo = MonsterRepository::new(&self.db);
        let monsters = repo.get_by_region_min_tier(region, min_tier).await?;

        Ok(monsters.choose(&mut rand::rng()).cloned())
    }
}
