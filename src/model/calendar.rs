//! Calendar anchors and the channels that follow the Blood Moon cycle.

use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// Center date of a three-day activation window, without a year.
///
/// The year is supplied at evaluation time, so one anchor yields one window per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarAnchor {
    pub month: u32,
    pub day: u32,
}

impl CalendarAnchor {
    /// Creates an anchor, rejecting dates that exist in no year.
    ///
    /// February 29 is accepted; it only materializes in leap years.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        // 2000 is a leap year so every real month/day pair is valid in it
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self { month, day })
    }

    /// Materializes the anchor in `year`.
    ///
    /// # Returns
    /// - `Some(NaiveDate)` - The anchor date in that year
    /// - `None` - The anchor does not exist that year (Feb 29 outside a leap year)
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    /// Anchor materialized in the year of `date`.
    pub fn for_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.in_year(date.year())
    }
}

/// Parses `MM-DD`.
impl FromStr for CalendarAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (month, day) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected MM-DD, got '{}'", s))?;

        let month = month
            .parse::<u32>()
            .map_err(|e| format!("invalid month in '{}': {}", s, e))?;
        let day = day
            .parse::<u32>()
            .map_err(|e| format!("invalid day in '{}': {}", s, e))?;

        CalendarAnchor::new(month, day).ok_or_else(|| format!("'{}' is not a calendar date", s))
    }
}

/// A channel that is renamed and announced to during the Blood Moon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloodMoonChannel {
    pub channel_id: u64,
    /// Channel name while the Blood Moon is active.
    pub active_name: String,
    /// Channel name outside the Blood Moon.
    pub default_name: String,
}
