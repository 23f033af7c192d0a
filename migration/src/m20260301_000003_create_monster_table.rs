use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Monster::Table)
                    .if_not_exists()
                    .col(pk_auto(Monster::Id))
                    .col(string(Monster::Name))
                    .col(string(Monster::Region))
                    .col(integer(Monster::Tier))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_monster_region_tier")
                    .table(Monster::Table)
                    .col(Monster::Region)
                    .col(Monster::Tier)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_monster_region_tier")
                    .table(Monster::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Monster::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Monster {
    Table,
    Id,
    Name,
    Region,
    Tier,
}
