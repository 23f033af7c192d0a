pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_announcement_record_table;
mod m20260301_000002_create_trigger_state_table;
mod m20260301_000003_create_monster_table;
mod m20260301_000004_create_raid_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_announcement_record_table::Migration),
            Box::new(m20260301_000002_create_trigger_state_table::Migration),
            Box::new(m20260301_000003_create_monster_table::Migration),
            Box::new(m20260301_000004_create_raid_table::Migration),
        ]
    }
}
