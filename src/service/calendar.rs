//! Blood Moon calendar detection and announcement orchestration.
//!
//! [`CalendarEventDetector`] is a pure function of `now`, the configured anchors, the
//! activation hour and the event timezone; it keeps no state between ticks and never
//! reads the host clock or locale. [`CalendarEventService`] runs the detector every
//! tick and drives the side effects (channel renames, announcements), using the
//! announcement repository to make each edge happen at most once per channel and day.
//!
//! Per channel the event cycles `Inactive -> Active -> Inactive`. The entry edge is
//! evaluated on every active day at the activation hour; the exit edge fires at the
//! activation hour of the first inactive day after a window.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

use crate::{
    data::announcement::AnnouncementRepository,
    error::{config::ConfigError, external::ExternalError, AppError},
    model::{
        announcement::{AnnouncementType, RecordOutcome},
        calendar::{BloodMoonChannel, CalendarAnchor},
        channel::ChannelRenameMapping,
    },
    service::channel_toggle::ChannelPresentationToggle,
};

/// Posts world event announcements to a channel.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(
        &self,
        channel_id: u64,
        announcement_type: AnnouncementType,
    ) -> Result<(), ExternalError>;
}

/// Returns true when `date` lies in `[anchor - 1, anchor + 1]` for any anchor.
///
/// Each anchor is materialized in `date`'s own year. Anchors that do not exist in that
/// year (February 29 outside a leap year) are ignored.
pub fn is_date_in_window(date: NaiveDate, anchors: &[CalendarAnchor]) -> bool {
    anchors
        .iter()
        .filter_map(|anchor| anchor.for_date(date))
        .any(|anchor| {
            let first = anchor.pred_opt().unwrap_or(anchor);
            let last = anchor.succ_opt().unwrap_or(anchor);
            date >= first && date <= last
        })
}

/// Stateless Blood Moon window and activation detector.
#[derive(Debug, Clone)]
pub struct CalendarEventDetector {
    anchors: Vec<CalendarAnchor>,
    activation_hour: u32,
    timezone: Tz,
}

impl CalendarEventDetector {
    pub fn new(anchors: Vec<CalendarAnchor>, activation_hour: u32, timezone: Tz) -> Self {
        Self {
            anchors,
            activation_hour,
            timezone,
        }
    }

    pub fn anchors(&self) -> &[CalendarAnchor] {
        &self.anchors
    }

    /// Calendar date of `now` in the event timezone.
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    /// Idempotency key for the local day, `YYYY-MM-DD`.
    pub fn date_key(&self, now: DateTime<Utc>) -> String {
        self.local_date(now).format("%Y-%m-%d").to_string()
    }

    /// True when the local date of `now` is inside any activation window.
    pub fn is_active_window(&self, now: DateTime<Utc>) -> bool {
        is_date_in_window(self.local_date(now), &self.anchors)
    }

    /// True during the configured local activation hour.
    ///
    /// Shared by the entry and exit edges, which happen at the same hour on different
    /// days.
    pub fn is_activation_instant(&self, now: DateTime<Utc>) -> bool {
        now.with_timezone(&self.timezone).hour() == self.activation_hour
    }

    /// Window entry: an active day at the activation hour.
    pub fn is_entry_edge(&self, now: DateTime<Utc>) -> bool {
        self.is_activation_instant(now) && self.is_active_window(now)
    }

    /// Window exit: the activation hour of an inactive day whose previous day was active.
    ///
    /// Compares the previous local day's state with today's, so the edge is found on
    /// the day after `anchor + 1` and never inside a window.
    pub fn is_exit_edge(&self, now: DateTime<Utc>) -> bool {
        if !self.is_activation_instant(now) {
            return false;
        }

        let today = self.local_date(now);
        let Some(yesterday) = today.pred_opt() else {
            return false;
        };

        is_date_in_window(yesterday, &self.anchors) && !is_date_in_window(today, &self.anchors)
    }
}

/// Channels touched by one calendar tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarTickReport {
    /// Channels that received a start announcement this tick.
    pub started: Vec<u64>,
    /// Channels that received an end announcement this tick.
    pub ended: Vec<u64>,
    /// Channels left pending because a rename or announcement failed.
    pub failed: Vec<u64>,
}

/// Drives Blood Moon side effects from the detector's answer each tick.
pub struct CalendarEventService {
    db: DatabaseConnection,
    detector: CalendarEventDetector,
    channels: Vec<BloodMoonChannel>,
    toggle: ChannelPresentationToggle,
    announcer: Arc<dyn Announcer>,
}

impl CalendarEventService {
    pub fn new(
        db: DatabaseConnection,
        detector: CalendarEventDetector,
        channels: Vec<BloodMoonChannel>,
        toggle: ChannelPresentationToggle,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        Self {
            db,
            detector,
            channels,
            toggle,
            announcer,
        }
    }

    /// Whether `channel_id` should receive a start announcement at `now`.
    pub async fn should_announce_start(
        &self,
        channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        if !self.detector.is_entry_edge(now) {
            return Ok(false);
        }

        let repo = AnnouncementRepository::new(&self.db);
        let sent = repo
            .has_been_sent(channel_id, AnnouncementType::Start, &self.detector.date_key(now))
            .await?;

        Ok(!sent)
    }

    /// Whether `channel_id` should receive an end announcement at `now`.
    pub async fn should_announce_end(
        &self,
        channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        if !self.detector.is_exit_edge(now) {
            return Ok(false);
        }

        let repo = AnnouncementRepository::new(&self.db);
        let sent = repo
            .has_been_sent(channel_id, AnnouncementType::End, &self.detector.date_key(now))
            .await?;

        Ok(!sent)
    }

    /// Runs one calendar evaluation.
    ///
    /// Channels whose rename or announcement fails are left unrecorded, so they are
    /// retried on the next tick within the activation hour.
    ///
    /// # Returns
    /// - `Ok(CalendarTickReport)` - Channels started, ended or left pending this tick
    /// - `Err(AppError::ConfigErr)` - No anchors configured
    /// - `Err(AppError::DbErr)` - Idempotency store unavailable
    pub async fn process(&self, now: DateTime<Utc>) -> Result<CalendarTickReport, AppError> {
        if self.detector.anchors().is_empty() {
            return Err(ConfigError::EmptyAnchorList.into());
        }

        let mut report = CalendarTickReport::default();

        if self.detector.is_entry_edge(now) {
            self.announce_start(now, &mut report).await?;
        } else if self.detector.is_exit_edge(now) {
            self.announce_end(now, &mut report).await?;
        }

        Ok(report)
    }

    async fn announce_start(
        &self,
        now: DateTime<Utc>,
        report: &mut CalendarTickReport,
    ) -> Result<(), AppError> {
        let mut pending = Vec::new();
        for channel in &self.channels {
            if self.should_announce_start(channel.channel_id, now).await? {
                pending.push(channel);
            }
        }

        if pending.is_empty() {
            return Ok(());
        }

        tracing::info!(
            "Blood Moon rising for {} ({} channels pending)",
            self.detector.date_key(now),
            pending.len()
        );

        let mapping: ChannelRenameMapping = pending
            .iter()
            .map(|channel| (channel.channel_id, channel.active_name.clone()))
            .collect();
        let renames = self.toggle.apply(&mapping).await;
        if renames.failure_count() > 0 {
            tracing::warn!(
                "{} Blood Moon channel renames failed, announcing anyway",
                renames.failure_count()
            );
        }

        for channel in pending {
            self.announce_and_record(channel.channel_id, AnnouncementType::Start, now, report)
                .await?;
        }

        Ok(())
    }

    async fn announce_end(
        &self,
        now: DateTime<Utc>,
        report: &mut CalendarTickReport,
    ) -> Result<(), AppError> {
        let mut pending = Vec::new();
        for channel in &self.channels {
            if self.should_announce_end(channel.channel_id, now).await? {
                pending.push(channel);
            }
        }

        if pending.is_empty() {
            return Ok(());
        }

        tracing::info!(
            "Blood Moon fading for {} ({} channels pending)",
            self.detector.date_key(now),
            pending.len()
        );

        let mapping: ChannelRenameMapping = pending
            .iter()
            .map(|channel| (channel.channel_id, channel.default_name.clone()))
            .collect();
        let updated = self.toggle.apply(&mapping).await.updated_channels();

        for channel in pending {
            // Only channels restored to their default name hear that the event ended
            if !updated.contains(&channel.channel_id) {
                report.failed.push(channel.channel_id);
                continue;
            }

            self.announce_and_record(channel.channel_id, AnnouncementType::End, now, report)
                .await?;
        }

        Ok(())
    }

    /// Claims the announcement key, then posts the announcement.
    ///
    /// The record is written before the send so two workers racing on the same key
    /// cannot both post. A failed send releases the claim for a retry on a later tick.
    async fn announce_and_record(
        &self,
        channel_id: u64,
        announcement_type: AnnouncementType,
        now: DateTime<Utc>,
        report: &mut CalendarTickReport,
    ) -> Result<(), AppError> {
        let date_key = self.detector.date_key(now);
        let repo = AnnouncementRepository::new(&self.db);

        let outcome = repo
            .record_sent(channel_id, announcement_type, &date_key, now)
            .await?;

        if outcome == RecordOutcome::AlreadyExists {
            tracing::info!(
                "Blood Moon {} announcement for channel {} was already claimed by another worker",
                announcement_type,
                channel_id
            );
            return Ok(());
        }

        if let Err(e) = self.announcer.announce(channel_id, announcement_type).await {
            tracing::error!(
                "Failed to post Blood Moon {} announcement to channel {}: {}",
                announcement_type,
                channel_id,
                e
            );

            if let Err(e) = repo.release(channel_id, announcement_type, &date_key).await {
                // The claim stays in place, so this day's announcement is lost for the channel
                tracing::error!(
                    "Failed to release Blood Moon {} claim for channel {}: {}",
                    announcement_type,
                    channel_id,
                    e
                );
            }

            report.failed.push(channel_id);
            return Ok(());
        }

        match announcement_type {
            AnnouncementType::Start => report.started.push(channel_id),
            AnnouncementType::End => report.ended.push(channel_id),
        }

        Ok(())
    }
}
