use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::model::encounter::CreateRaidParam;

pub struct RaidRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RaidRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new raid record
    ///
    /// # Returns
    /// - `Ok(Model)`: The created raid record
    /// - `Err(DbErr)`: Database error
    pub async fn create(&self, param: CreateRaidParam) -> Result<entity::raid::Model, DbErr> {
        entity::raid::ActiveModel {
            id: ActiveValue::NotSet,
            monster_name: ActiveValue::Set(param.monster_name),
            monster_tier: ActiveValue::Set(param.monster_tier),
            village: ActiveValue::Set(param.village),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            is_automated: ActiveValue::Set(param.is_automated),
            created_at: ActiveValue::Set(param.created_at),
        }
        .insert(self.db)
        .await
    }
}
