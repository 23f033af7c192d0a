use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Raid::Table)
                    .if_not_exists()
                    .col(pk_auto(Raid::Id))
                    .col(string(Raid::MonsterName))
                    .col(integer(Raid::MonsterTier))
                    .col(string(Raid::Village))
                    .col(string(Raid::ChannelId))
                    .col(boolean(Raid::IsAutomated).default(false))
                    .col(
                        timestamp(Raid::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Raid::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Raid {
    Table,
    Id,
    MonsterName,
    MonsterTier,
    Village,
    ChannelId,
    IsAutomated,
    CreatedAt,
}
