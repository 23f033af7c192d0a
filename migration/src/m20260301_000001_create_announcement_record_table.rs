use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Composite primary key enforces one announcement per channel, type and day
        manager
            .create_table(
                Table::create()
                    .table(AnnouncementRecord::Table)
                    .if_not_exists()
                    .col(string(AnnouncementRecord::ChannelId))
                    .col(string(AnnouncementRecord::AnnouncementType))
                    .col(string(AnnouncementRecord::DateKey))
                    .col(
                        timestamp(AnnouncementRecord::SentAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(AnnouncementRecord::ChannelId)
                            .col(AnnouncementRecord::AnnouncementType)
                            .col(AnnouncementRecord::DateKey),
                    )
                    .to_owned(),
            )
            .await?;

        // Retention sweep filters on sent_at
        manager
            .create_index(
                Index::create()
                    .name("idx_announcement_record_sent_at")
                    .table(AnnouncementRecord::Table)
                    .col(AnnouncementRecord::SentAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_announcement_record_sent_at")
                    .table(AnnouncementRecord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AnnouncementRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AnnouncementRecord {
    Table,
    ChannelId,
    AnnouncementType,
    DateKey,
    SentAt,
}
