//! Discord gateway integration.
//!
//! The bot feeds guild chat activity into the shared [`ActivityAggregator`] and owns
//! the HTTP client the Discord adapters use for renames, announcements and raid
//! alerts. It runs in its own tokio task next to the world event scheduler.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild and channel metadata for permission checks
//! - `GUILD_MESSAGES` - Message events counted toward raid activity
//!
//! Message content is never read, so the privileged `MESSAGE_CONTENT` intent is not
//! requested.
//!
//! [`ActivityAggregator`]: crate::service::activity::ActivityAggregator

pub mod handler;
pub mod start;
