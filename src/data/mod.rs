//! Database repository layer.
//!
//! Repositories wrap SeaORM queries for each table and convert entity models to domain
//! models at the boundary. All database reads and writes of the engine go through
//! these types.

pub mod announcement;
pub mod monster;
pub mod raid;
pub mod trigger_state;

#[cfg(test)]
mod test;
