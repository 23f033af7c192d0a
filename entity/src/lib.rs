//! SeaORM entity definitions for the world events engine.

pub mod prelude;

pub mod announcement_record;
pub mod monster;
pub mod raid;
pub mod trigger_state;
