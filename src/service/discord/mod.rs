//! Serenity-backed implementations of the collaborator traits.

pub mod announcer;
pub mod channel;

pub use announcer::DiscordAnnouncer;
pub use channel::DiscordChannelDirectory;
