use sea_orm::entity::prelude::*;

/// One sent world event announcement.
///
/// The composite primary key is the idempotency key: at most one row may exist
/// per channel, announcement type and local calendar day.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "announcement_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub channel_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub announcement_type: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub date_key: String,
    pub sent_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
