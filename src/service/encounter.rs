//! Activity-triggered raid encounters.
//!
//! The trigger reads server-wide activity from the shared aggregator on every tick.
//! When enough messages from enough distinct users accumulate and the global cooldown
//! has elapsed, it consumes the cooldown, clears the aggregator, picks a random
//! village and hands a raid to the dispatcher.
//!
//! The cooldown is consumed before any external call. If no monster is found or the
//! catalog fails, the trigger window is wasted rather than retried, so two raids can
//! never start within one cooldown.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    config::EventConfig,
    data::trigger_state::TriggerStateRepository,
    error::{config::ConfigError, external::ExternalError, AppError},
    model::encounter::{Monster, RaidOutcome, RaidRequest, TriggerOutcome, Village},
    service::activity::SharedActivity,
};

/// Key under which the raid trigger persists its last fire time.
pub const RAID_TRIGGER_NAME: &str = "raid_encounter";

/// Looks up monsters eligible for a raid.
#[async_trait]
pub trait MonsterCatalog: Send + Sync {
    /// Returns one monster native to `region` with tier `>= min_tier`, if any.
    async fn get_above_tier_by_region(
        &self,
        min_tier: i32,
        region: &str,
    ) -> Result<Option<Monster>, ExternalError>;
}

/// Opens raids.
#[async_trait]
pub trait RaidDispatcher: Send + Sync {
    async fn trigger(&self, request: RaidRequest) -> RaidOutcome;
}

/// Thresholds and limits for the raid trigger.
#[derive(Debug, Clone)]
pub struct EncounterSettings {
    pub message_threshold: usize,
    pub min_unique_users: usize,
    pub cooldown: Duration,
    pub min_monster_tier: i32,
}

impl EncounterSettings {
    pub fn from_config(config: &EventConfig) -> Self {
        Self {
            message_threshold: config.message_threshold,
            min_unique_users: config.min_unique_users,
            cooldown: config.raid_cooldown,
            min_monster_tier: config.min_monster_tier,
        }
    }
}

pub struct EncounterTrigger {
    db: DatabaseConnection,
    settings: EncounterSettings,
    villages: Vec<Village>,
    activity: SharedActivity,
    catalog: Arc<dyn MonsterCatalog>,
    dispatcher: Arc<dyn RaidDispatcher>,
    /// Guarded for the whole check-and-consume so concurrent evaluations cannot both fire.
    last_trigger_time: Mutex<Option<DateTime<Utc>>>,
}

impl EncounterTrigger {
    pub fn new(
        db: DatabaseConnection,
        settings: EncounterSettings,
        villages: Vec<Village>,
        activity: SharedActivity,
        catalog: Arc<dyn MonsterCatalog>,
        dispatcher: Arc<dyn RaidDispatcher>,
    ) -> Self {
        Self {
            db,
            settings,
            villages,
            activity,
            catalog,
            dispatcher,
            last_trigger_time: Mutex::new(None),
        }
    }

    /// Loads the persisted last fire time so a restart keeps an active cooldown.
    ///
    /// # Returns
    /// - `Ok(Some(DateTime<Utc>))` - Restored last fire time
    /// - `Ok(None)` - The trigger has never fired
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn restore(&self) -> Result<Option<DateTime<Utc>>, AppError> {
        let repo = TriggerStateRepository::new(&self.db);
        let restored = repo.get_last_triggered(RAID_TRIGGER_NAME).await?;

        *self.last_trigger_time.lock().await = restored;

        if let Some(at) = restored {
            tracing::info!("Restored raid trigger cooldown, last fired at {}", at);
        }

        Ok(restored)
    }

    #[cfg(test)]
    pub async fn last_trigger_time(&self) -> Option<DateTime<Utc>> {
        *self.last_trigger_time.lock().await
    }

    /// Evaluates the trigger at `now`.
    ///
    /// # Returns
    /// - `Ok(TriggerOutcome::SkippedCooldown)` - Cooldown active; nothing changed
    /// - `Ok(TriggerOutcome::SkippedBelowThreshold)` - Not enough activity; nothing changed
    /// - `Ok(TriggerOutcome::FailedNoMonster)` - Fired, but no eligible monster
    /// - `Ok(TriggerOutcome::Dispatched)` - Fired and handed to the dispatcher
    /// - `Err(AppError::ConfigErr)` - No villages, or the selected village has no
    ///   channel; nothing changed
    /// - `Err(AppError::ExternalErr)` - Catalog lookup failed after firing; the
    ///   cooldown stays consumed
    pub async fn evaluate(&self, now: DateTime<Utc>) -> Result<TriggerOutcome, AppError> {
        let (village, channel_id) = {
            let mut last_trigger_time = self.last_trigger_time.lock().await;

            if let Some(remaining) = self.cooldown_remaining(&mut last_trigger_time, now) {
                return Ok(TriggerOutcome::SkippedCooldown { remaining });
            }

            let mut activity = self.activity.lock().await;
            let snapshot = activity.snapshot(now);

            if snapshot.total_messages < self.settings.message_threshold
                || snapshot.total_unique_users < self.settings.min_unique_users
            {
                return Ok(TriggerOutcome::SkippedBelowThreshold {
                    total_messages: snapshot.total_messages,
                    total_unique_users: snapshot.total_unique_users,
                });
            }

            let village = self.select_village()?;
            let channel_id = village
                .channel_id
                .ok_or_else(|| ConfigError::MissingVillageChannel(village.name.clone()))?;

            *last_trigger_time = Some(now);
            activity.reset_all();

            tracing::info!(
                "Raid trigger fired: {} messages from {} users, targeting {}",
                snapshot.total_messages,
                snapshot.total_unique_users,
                village.name
            );

            (village, channel_id)
        };

        let repo = TriggerStateRepository::new(&self.db);
        if let Err(e) = repo.set_last_triggered(RAID_TRIGGER_NAME, now).await {
            // The in-memory cooldown still holds for this process
            tracing::error!("Failed to persist raid trigger time: {}", e);
        }

        let monster = self
            .catalog
            .get_above_tier_by_region(self.settings.min_monster_tier, &village.region)
            .await?;

        let Some(monster) = monster else {
            tracing::warn!(
                "No tier {}+ monster found in {} for raid on {}",
                self.settings.min_monster_tier,
                village.region,
                village.name
            );
            return Ok(TriggerOutcome::FailedNoMonster {
                village: village.name,
                region: village.region,
            });
        };

        let village_name = village.name.clone();
        let monster_name = monster.name.clone();

        let outcome = self
            .dispatcher
            .trigger(RaidRequest {
                monster,
                village,
                channel_id,
                is_automated: true,
            })
            .await;

        if outcome.success {
            tracing::info!("Raid started: {} attacks {}", monster_name, village_name);
        } else {
            tracing::error!(
                "Raid dispatch for {} failed: {}",
                village_name,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }

        Ok(TriggerOutcome::Dispatched {
            village: village_name,
            monster: monster_name,
            outcome,
        })
    }

    /// Remaining cooldown at `now`, or `None` when the trigger may fire.
    ///
    /// A last fire time in the future means the clock moved backwards; the cooldown is
    /// restarted from `now` instead of blocking for the skew.
    fn cooldown_remaining(
        &self,
        last_trigger_time: &mut Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<Duration> {
        let previous = (*last_trigger_time)?;
        let elapsed = now - previous;

        if elapsed < Duration::zero() {
            tracing::warn!(
                "Raid trigger last fired at {} which is after now ({}), restarting cooldown",
                previous,
                now
            );
            *last_trigger_time = Some(now);
            return Some(self.settings.cooldown);
        }

        if elapsed < self.settings.cooldown {
            return Some(self.settings.cooldown - elapsed);
        }

        None
    }

    fn select_village(&self) -> Result<Village, ConfigError> {
        self.villages
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(ConfigError::NoVillages)
    }
}
