//! Announcement record factory for seeding the idempotency table.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating announcement records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::announcement_record::AnnouncementRecordFactory;
///
/// let record = AnnouncementRecordFactory::new(&db, "123", "end", "2026-06-17")
///     .sent_at(Utc::now() - chrono::Duration::days(40))
///     .build()
///     .await?;
/// ```
pub struct AnnouncementRecordFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: String,
    announcement_type: String,
    date_key: String,
    sent_at: DateTime<Utc>,
}

impl<'a> AnnouncementRecordFactory<'a> {
    /// Creates a new factory for the given key, sent now.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `channel_id` - Discord channel ID as string
    /// - `announcement_type` - `"start"` or `"end"`
    /// - `date_key` - Local calendar day as `YYYY-MM-DD`
    pub fn new(
        db: &'a DatabaseConnection,
        channel_id: impl Into<String>,
        announcement_type: impl Into<String>,
        date_key: impl Into<String>,
    ) -> Self {
        Self {
            db,
            channel_id: channel_id.into(),
            announcement_type: announcement_type.into(),
            date_key: date_key.into(),
            sent_at: Utc::now(),
        }
    }

    /// Sets when the announcement was sent.
    pub fn sent_at(mut self, sent_at: DateTime<Utc>) -> Self {
        self.sent_at = sent_at;
        self
    }

    /// Builds and inserts the record into the database.
    ///
    /// # Returns
    /// - `Ok(entity::announcement_record::Model)` - Created record
    /// - `Err(DbErr)` - Database error during insert, including a duplicate key
    pub async fn build(self) -> Result<entity::announcement_record::Model, DbErr> {
        entity::announcement_record::ActiveModel {
            channel_id: ActiveValue::Set(self.channel_id),
            announcement_type: ActiveValue::Set(self.announcement_type),
            date_key: ActiveValue::Set(self.date_key),
            sent_at: ActiveValue::Set(self.sent_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an announcement record sent now.
///
/// Shorthand for `AnnouncementRecordFactory::new(db, ..).build().await`.
pub async fn create_announcement_record(
    db: &DatabaseConnection,
    channel_id: impl Into<String>,
    announcement_type: impl Into<String>,
    date_key: impl Into<String>,
) -> Result<entity::announcement_record::Model, DbErr> {
    AnnouncementRecordFactory::new(db, channel_id, announcement_type, date_key)
        .build()
        .await
}
