//! Monster factory for seeding the catalog table.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating monsters with customizable fields.
///
/// Defaults:
/// - name: `"Monster {id}"`
/// - region: `"Eldin"`
/// - tier: `5`
pub struct MonsterFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    region: String,
    tier: i32,
}

impl<'a> MonsterFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Monster {}", id),
            region: "Eldin".to_string(),
            tier: 5,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn tier(mut self, tier: i32) -> Self {
        self.tier = tier;
        self
    }

    /// Builds and inserts the monster into the database.
    pub async fn build(self) -> Result<entity::monster::Model, DbErr> {
        entity::monster::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.name),
            region: ActiveValue::Set(self.region),
            tier: ActiveValue::Set(self.tier),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a monster in the given region and tier.
pub async fn create_monster(
    db: &DatabaseConnection,
    region: impl Into<String>,
    tier: i32,
) -> Result<entity::monster::Model, DbErr> {
    MonsterFactory::new(db).region(region).tier(tier).build().await
}
