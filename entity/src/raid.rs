use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "raid")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub monster_name: String,
    pub monster_tier: i32,
    pub village: String,
    pub channel_id: String,
    pub is_automated: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
