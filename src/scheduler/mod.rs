//! Background jobs driving the world event detectors.

pub mod world_events;
