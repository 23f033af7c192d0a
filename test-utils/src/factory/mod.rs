//! Factory methods for creating test data.
//!
//! Each table has its own factory module with a `Factory` struct for customization and
//! a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let monster = factory::monster::MonsterFactory::new(&db)
//!     .region("Eldin")
//!     .tier(7)
//!     .build()
//!     .await?;
//!
//! let record = factory::create_announcement_record(&db, "123", "start", "2026-06-14").await?;
//! ```

pub mod announcement_record;
pub mod helpers;
pub mod monster;

pub use announcement_record::create_announcement_record;
pub use monster::create_monster;
