//! Aggregated chat activity reported by the activity aggregator.

use std::collections::HashMap;

/// Activity counters for one channel inside the sliding window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelActivity {
    /// Messages observed inside the window.
    pub message_count: usize,
    /// Distinct non-bot authors observed inside the window.
    pub unique_user_count: usize,
}

/// Point-in-time view of every tracked channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivitySnapshot {
    /// Per-channel counters keyed by Discord channel ID.
    pub channels: HashMap<u64, ChannelActivity>,
    /// Sum of messages across all channels.
    pub total_messages: usize,
    /// Distinct authors across all channels; a user active in two channels counts once.
    pub total_unique_users: usize,
}

impl ActivitySnapshot {
    /// Returns true when no channel holds any activity.
    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }
}
