//! Domain models for the world events engine.
//!
//! Models here are plain data passed between the scheduler, services and data layer.
//! Database entities are converted to these types at the repository boundary.

pub mod activity;
pub mod announcement;
pub mod calendar;
pub mod channel;
pub mod encounter;
