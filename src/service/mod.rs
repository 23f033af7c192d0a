//! Service layer for world event logic and orchestration.
//!
//! Services sit between the scheduler and the data layer. The calendar and encounter
//! services hold the detection rules; the Discord adapters and the database-backed
//! monster catalog and raid dispatcher implement the collaborator traits those rules
//! depend on.

pub mod activity;
pub mod calendar;
pub mod channel_toggle;
pub mod discord;
pub mod encounter;
pub mod monster;
pub mod raid;

#[cfg(test)]
pub(crate) mod test;
