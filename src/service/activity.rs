//! Sliding-window chat activity aggregation.
//!
//! The aggregator is owned by one explicitly constructed instance shared between the
//! gateway message handler (writer) and the encounter trigger (reader and resetter)
//! through [`SharedActivity`]. All operations are synchronous bookkeeping; callers
//! hold the mutex only for the duration of one call.

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::activity::{ActivitySnapshot, ChannelActivity};

/// Aggregator handle shared by the message handler and the encounter trigger.
pub type SharedActivity = Arc<Mutex<ActivityAggregator>>;

/// Recent activity for one channel.
#[derive(Debug, Default)]
struct ChannelWindow {
    /// Message timestamps, ascending.
    timestamps: VecDeque<DateTime<Utc>>,
    /// Last message instant per author, so authors age out with their messages.
    users: HashMap<u64, DateTime<Utc>>,
}

impl ChannelWindow {
    fn push(&mut self, user_id: u64, timestamp: DateTime<Utc>) {
        // Gateway events can arrive slightly out of order; keep the deque sorted so
        // eviction from the front stays exact
        let position = self.timestamps.partition_point(|t| *t <= timestamp);
        self.timestamps.insert(position, timestamp);

        let last_seen = self.users.entry(user_id).or_insert(timestamp);
        if timestamp > *last_seen {
            *last_seen = timestamp;
        }
    }

    fn evict_before(&mut self, cutoff: DateTime<Utc>) {
        while self.timestamps.front().is_some_and(|t| *t < cutoff) {
            self.timestamps.pop_front();
        }
        self.users.retain(|_, last_seen| *last_seen >= cutoff);
    }

    fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Per-channel sliding window of message timestamps and distinct authors.
#[derive(Debug)]
pub struct ActivityAggregator {
    window: Duration,
    excluded_channels: HashSet<u64>,
    channels: HashMap<u64, ChannelWindow>,
}

impl ActivityAggregator {
    /// Creates an empty aggregator.
    ///
    /// # Arguments
    /// - `window` - How far back messages count toward activity
    /// - `excluded_channels` - Channels whose messages are ignored entirely
    pub fn new(window: Duration, excluded_channels: HashSet<u64>) -> Self {
        Self {
            window,
            excluded_channels,
            channels: HashMap::new(),
        }
    }

    /// Wraps the aggregator for sharing across tasks.
    pub fn shared(self) -> SharedActivity {
        Arc::new(Mutex::new(self))
    }

    /// Records one chat message.
    ///
    /// Bot messages and messages in excluded channels are ignored. Entries older than
    /// the window relative to `timestamp` are evicted from the channel.
    pub fn record(&mut self, channel_id: u64, user_id: u64, is_bot: bool, timestamp: DateTime<Utc>) {
        if is_bot || self.excluded_channels.contains(&channel_id) {
            return;
        }

        let cutoff = timestamp - self.window;
        let channel = self.channels.entry(channel_id).or_default();
        channel.push(user_id, timestamp);
        channel.evict_before(cutoff);
    }

    /// Reports activity inside the window ending at `now`.
    ///
    /// Evicts stale entries from every channel first, so no reported message is older
    /// than the window. Channels left empty are dropped.
    pub fn snapshot(&mut self, now: DateTime<Utc>) -> ActivitySnapshot {
        let cutoff = now - self.window;

        for channel in self.channels.values_mut() {
            channel.evict_before(cutoff);
        }
        self.channels.retain(|_, channel| !channel.is_empty());

        let mut snapshot = ActivitySnapshot::default();
        let mut all_users: HashSet<u64> = HashSet::new();

        for (channel_id, channel) in &self.channels {
            snapshot.channels.insert(
                *channel_id,
                ChannelActivity {
                    message_count: channel.timestamps.len(),
                    unique_user_count: channel.users.len(),
                },
            );
            snapshot.total_messages += channel.timestamps.len();
            all_users.extend(channel.users.keys().copied());
        }
        snapshot.total_unique_users = all_users.len();

        snapshot
    }

    /// Clears every channel's window.
    pub fn reset_all(&mut self) {
        self.channels.clear();
    }
}
