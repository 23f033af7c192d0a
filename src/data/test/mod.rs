mod announcement;
mod monster;
mod raid;
mod trigger_state;
