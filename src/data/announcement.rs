//! Announcement idempotency store.
//!
//! Each world event announcement is keyed by `(channel_id, announcement_type, date_key)`.
//! The key is the table's composite primary key, so at most one record can exist per
//! channel, type and local day no matter how many ticks, processes or restarts race
//! to write it. Callers claim the key with `record_sent` before sending, and `release`
//! the claim when the send fails so a later tick can retry.

use chrono::{DateTime, Duration, Utc};
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};

use crate::model::announcement::{AnnouncementType, RecordOutcome};

pub struct AnnouncementRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnnouncementRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks whether an announcement was already sent for the key.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID
    /// - `announcement_type` - Start or end of the activation window
    /// - `date_key` - Local calendar day, `YYYY-MM-DD`
    ///
    /// # Returns
    /// - `Ok(true)` - A record exists for the key
    /// - `Ok(false)` - No record exists
    /// - `Err(DbErr)` - Database error during query
    pub async fn has_been_sent(
        &self,
        channel_id: u64,
        announcement_type: AnnouncementType,
        date_key: &str,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::AnnouncementRecord::find()
            .filter(entity::announcement_record::Column::ChannelId.eq(channel_id.to_string()))
            .filter(
                entity::announcement_record::Column::AnnouncementType
                    .eq(announcement_type.as_str()),
            )
            .filter(entity::announcement_record::Column::DateKey.eq(date_key))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Records that an announcement was sent, unless one already exists for the key.
    ///
    /// Uses `INSERT .. ON CONFLICT DO NOTHING` against the composite primary key, so two
    /// concurrent callers cannot both create a record; the loser observes `AlreadyExists`.
    ///
    /// # Returns
    /// - `Ok(RecordOutcome::Recorded)` - This call created the record
    /// - `Ok(RecordOutcome::AlreadyExists)` - A record for the key was already present
    /// - `Err(DbErr)` - Database error during insert
    pub async fn record_sent(
        &self,
        channel_id: u64,
        announcement_type: AnnouncementType,
        date_key: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<RecordOutcome, DbErr> {
        let result = entity::prelude::AnnouncementRecord::insert(
            entity::announcement_record::ActiveModel {
                channel_id: ActiveValue::Set(channel_id.to_string()),
                announcement_type: ActiveValue::Set(announcement_type.as_str().to_string()),
                date_key: ActiveValue::Set(date_key.to_string()),
                sent_at: ActiveValue::Set(sent_at),
            },
        )
        .on_conflict(
            OnConflict::columns([
                entity::announcement_record::Column::ChannelId,
                entity::announcement_record::Column::AnnouncementType,
                entity::announcement_record::Column::DateKey,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await;

        match result {
            Ok(0) => Ok(RecordOutcome::AlreadyExists),
            Ok(_) => Ok(RecordOutcome::Recorded),
            Err(DbErr::RecordNotInserted) => Ok(RecordOutcome::AlreadyExists),
            Err(e) => Err(e),
        }
    }

    /// Removes the record for the key so the announcement can be claimed again.
    ///
    /// Used to give back a claim made by `record_sent` when the announcement itself
    /// could not be delivered.
    ///
    /// # Returns
    /// - `Ok(true)` - The record existed and was deleted
    /// - `Ok(false)` - No record existed for the key
    /// - `Err(DbErr)` - Database error during delete
    pub async fn release(
        &self,
        channel_id: u64,
        announcement_type: AnnouncementType,
        date_key: &str,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::AnnouncementRecord::delete_by_id((
            channel_id.to_string(),
            announcement_type.as_str().to_string(),
            date_key.to_string(),
        ))
        .exec(self.db)
        .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes records sent before the retention window.
    ///
    /// Maintenance only: a missing record can at worst allow a repeat announcement for
    /// a day that is already `retention` in the past, which the detector never
    /// evaluates again. A retention reaching past the earliest representable instant
    /// deletes nothing.
    ///
    /// # Arguments
    /// - `retention` - Records with `sent_at` older than `now - retention` are deleted
    /// - `now` - Reference instant for the retention window
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted records
    /// - `Err(DbErr)` - Database error during delete
    pub async fn cleanup(&self, retention: Duration, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let Some(cutoff) = now.checked_sub_signed(retention.max(Duration::zero())) else {
            return Ok(0);
        };

        let result = entity::prelude::AnnouncementRecord::delete_many()
            .filter(entity::announcement_record::Column::SentAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
