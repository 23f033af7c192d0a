//! Channel presentation models used by the rename toggle.

use std::collections::{BTreeMap, BTreeSet};

/// What the channel directory knows about a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Current display name.
    pub name: String,
    /// Whether the bot may rename the channel.
    pub can_manage: bool,
}

/// Target display name per channel, applied as one non-transactional batch.
pub type ChannelRenameMapping = BTreeMap<u64, String>;

/// Outcome of applying one entry of a rename batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The channel was renamed.
    Renamed,
    /// The channel already had the requested name; no call was made.
    Unchanged,
    /// The bot lacks manage rights on the channel.
    PermissionDenied,
    /// The channel no longer exists.
    NotFound,
    /// Fetch or rename failed for a reason that may clear up by the next tick.
    Transient(String),
}

impl RenameOutcome {
    /// True when the channel now carries the requested name.
    pub fn is_applied(&self) -> bool {
        matches!(self, RenameOutcome::Renamed | RenameOutcome::Unchanged)
    }
}

/// Per-channel results of a rename batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    pub outcomes: BTreeMap<u64, RenameOutcome>,
}

impl RenameReport {
    /// Channels that now carry their requested name (renamed or already correct).
    pub fn updated_channels(&self) -> BTreeSet<u64> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_applied())
            .map(|(channel_id, _)| *channel_id)
            .collect()
    }

    /// Number of entries that failed for any reason.
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|outcome| !outcome.is_applied())
            .count()
    }
}
