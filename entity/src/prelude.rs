pub use super::announcement_record::Entity as AnnouncementRecord;
pub use super::monster::Entity as Monster;
pub use super::raid::Entity as Raid;
pub use super::trigger_state::Entity as TriggerState;
