use crate::{
    data::announcement::AnnouncementRepository,
    error::AppError,
    model::announcement::{AnnouncementType, RecordOutcome},
};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod cleanup;
mod has_been_sent;
mod record_sent;
mod release;
