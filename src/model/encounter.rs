//! Domain models for activity-triggered raid encounters.

use chrono::{DateTime, Duration, Utc};

/// A village that can be targeted by a raid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Village {
    pub name: String,
    /// Region used to pick a native monster.
    pub region: String,
    /// Channel where the raid is posted. `None` is a configuration error at trigger time.
    pub channel_id: Option<u64>,
}

/// A monster returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    pub id: i32,
    pub name: String,
    pub region: String,
    pub tier: i32,
}

impl Monster {
    /// Converts an entity model to a monster domain model at the repository boundary.
    pub fn from_entity(entity: entity::monster::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            region: entity.region,
            tier: entity.tier,
        }
    }
}

/// Everything the raid dispatcher needs to open a raid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidRequest {
    pub monster: Monster,
    pub village: Village,
    pub channel_id: u64,
    /// True for raids opened by the encounter trigger rather than a moderator.
    pub is_automated: bool,
}

/// Result reported by the raid dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl RaidOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Result of one encounter trigger evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The global cooldown has not elapsed; nothing changed.
    SkippedCooldown { remaining: Duration },
    /// Server-wide activity is below the message or unique-user threshold.
    SkippedBelowThreshold {
        total_messages: usize,
        total_unique_users: usize,
    },
    /// The trigger fired but the village's region had no eligible monster.
    ///
    /// The cooldown stays consumed.
    FailedNoMonster { village: String, region: String },
    /// The trigger fired and a raid was handed to the dispatcher.
    Dispatched {
        village: String,
        monster: String,
        outcome: RaidOutcome,
    },
}

impl TriggerOutcome {
    /// True when this evaluation consumed the cooldown.
    pub fn fired(&self) -> bool {
        matches!(
            self,
            TriggerOutcome::FailedNoMonster { .. } | TriggerOutcome::Dispatched { .. }
        )
    }
}

/// Parameters for recording a newly opened raid.
#[derive(Debug, Clone)]
pub struct CreateRaidParam {
    pub monster_name: String,
    pub monster_tier: i32,
    pub village: String,
    pub channel_id: u64,
    pub is_automated: bool,
    pub created_at: DateTime<Utc>,
}
