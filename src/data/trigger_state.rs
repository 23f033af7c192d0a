//! Persistence for trigger cooldown state.
//!
//! The encounter trigger keeps its last fire time in memory and mirrors it here so a
//! restart does not forget an active cooldown.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

pub struct TriggerStateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TriggerStateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the last fire time of the named trigger.
    ///
    /// # Returns
    /// - `Ok(Some(DateTime<Utc>))` - The trigger has fired before
    /// - `Ok(None)` - No state stored for the trigger
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_last_triggered(&self, name: &str) -> Result<Option<DateTime<Utc>>, DbErr> {
        let state = entity::prelude::TriggerState::find_by_id(name.to_string())
            .one(self.db)
            .await?;

        Ok(state.map(|state| state.last_triggered_at))
    }

    /// Stores the last fire time of the named trigger, replacing any previous value.
    pub async fn set_last_triggered(&self, name: &str, at: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::TriggerState::insert(entity::trigger_state::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            last_triggered_at: ActiveValue::Set(at),
        })
        .on_conflict(
            OnConflict::column(entity::trigger_state::Column::Name)
                .update_column(entity::trigger_state::Column::LastTriggeredAt)
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }
}
