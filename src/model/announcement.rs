//! Domain models for world event announcement records.

use std::fmt;

/// Which edge of the activation window an announcement marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnouncementType {
    /// Window entry: the Blood Moon rises.
    Start,
    /// Window exit: the Blood Moon fades.
    End,
}

impl AnnouncementType {
    /// Value stored in the `announcement_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementType::Start => "start",
            AnnouncementType::End => "end",
        }
    }
}

impl fmt::Display for AnnouncementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an insert-if-absent on the idempotency key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// This call created the record.
    Recorded,
    /// A record for the same key already existed; nothing was written.
    AlreadyExists,
}
