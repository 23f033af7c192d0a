use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::America::New_York;
use std::sync::Arc;
use test_utils::builder::TestBuilder;

use crate::{
    data::announcement::AnnouncementRepository,
    error::{config::ConfigError, AppError},
    model::{
        announcement::AnnouncementType,
        calendar::{BloodMoonChannel, CalendarAnchor},
    },
    service::{
        calendar::{is_date_in_window, CalendarEventDetector, CalendarEventService},
        channel_toggle::ChannelPresentationToggle,
        test::fake::{FakeAnnouncer, FakeChannelDirectory},
    },
};

const CHANNEL: u64 = 10;

fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    New_York
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn june_15() -> Vec<CalendarAnchor> {
    vec![CalendarAnchor::new(6, 15).unwrap()]
}

fn service(
    db: &sea_orm::DatabaseConnection,
    anchors: Vec<CalendarAnchor>,
    directory: Arc<FakeChannelDirectory>,
    announcer: Arc<FakeAnnouncer>,
) -> CalendarEventService {
    CalendarEventService::new(
        db.clone(),
        CalendarEventDetector::new(anchors, 20, New_York),
        vec![BloodMoonChannel {
            channel_id: CHANNEL,
            active_name: "blood-moon".to_string(),
            default_name: "town-square".to_string(),
        }],
        ChannelPresentationToggle::new(directory),
        announcer,
    )
}

fn town_square() -> Arc<FakeChannelDirectory> {
    Arc::new(FakeChannelDirectory::new().with_channel(CHANNEL, "town-square", true))
}

/// Tests the three-day window around an anchor.
///
/// Expected: June 14, 15 and 16 active; June 13 and 17 inactive
#[test]
fn window_spans_anchor_plus_minus_one_day() {
    let anchors = june_15();

    assert!(!is_date_in_window(date(2026, 6, 13), &anchors));
    assert!(is_date_in_window(date(2026, 6, 14), &anchors));
    assert!(is_date_in_window(date(2026, 6, 15), &anchors));
    assert!(is_date_in_window(date(2026, 6, 16), &anchors));
    assert!(!is_date_in_window(date(2026, 6, 17), &anchors));
}

/// Tests that anchors are materialized in the evaluated date's own year.
///
/// A January 1 anchor therefore never covers December 31 of any year.
///
/// Expected: Dec 31 inactive, Jan 1 and Jan 2 active
#[test]
fn january_anchor_does_not_reach_back_into_december() {
    let anchors = vec![CalendarAnchor::new(1, 1).unwrap()];

    assert!(!is_date_in_window(date(2026, 12, 31), &anchors));
    assert!(is_date_in_window(date(2027, 1, 1), &anchors));
    assert!(is_date_in_window(date(2027, 1, 2), &anchors));
}

/// Tests a February 29 anchor.
///
/// Expected: window Feb 28 to Mar 1 in a leap year, no window otherwise
#[test]
fn leap_day_anchor_only_exists_in_leap_years() {
    let anchors = vec![CalendarAnchor::new(2, 29).unwrap()];

    assert!(is_date_in_window(date(2028, 2, 28), &anchors));
    assert!(is_date_in_window(date(2028, 3, 1), &anchors));
    assert!(!is_date_in_window(date(2027, 2, 28), &anchors));
    assert!(!is_date_in_window(date(2027, 3, 1), &anchors));
}

/// Tests a configuration with several anchors.
///
/// Each anchor contributes its own three-day window and its own exit edge; days
/// between the windows stay inactive.
///
/// Expected: Jan 12-14 and Jun 14-16 active, exits at 20:00 on Jan 15 and Jun 17
#[test]
fn multiple_anchors_each_open_a_window() {
    let anchors = vec![
        CalendarAnchor::new(1, 13).unwrap(),
        CalendarAnchor::new(6, 15).unwrap(),
    ];

    for day in 12..=14 {
        assert!(is_date_in_window(date(2026, 1, day), &anchors));
    }
    for day in 14..=16 {
        assert!(is_date_in_window(date(2026, 6, day), &anchors));
    }
    assert!(!is_date_in_window(date(2026, 1, 11), &anchors));
    assert!(!is_date_in_window(date(2026, 1, 15), &anchors));
    assert!(!is_date_in_window(date(2026, 3, 1), &anchors));
    assert!(!is_date_in_window(date(2026, 6, 13), &anchors));

    let detector = CalendarEventDetector::new(anchors, 20, New_York);
    assert!(detector.is_entry_edge(local(2026, 1, 12, 20, 0)));
    assert!(detector.is_entry_edge(local(2026, 6, 16, 20, 0)));
    assert!(!detector.is_entry_edge(local(2026, 3, 1, 20, 0)));
    assert!(detector.is_exit_edge(local(2026, 1, 15, 20, 0)));
    assert!(detector.is_exit_edge(local(2026, 6, 17, 20, 0)));
    assert!(!detector.is_exit_edge(local(2026, 3, 1, 20, 0)));
    assert!(!detector.is_exit_edge(local(2026, 6, 14, 20, 0)));
}

/// Tests that date and hour are evaluated in the event timezone.
///
/// 2026-06-15T00:30Z is 20:30 on June 14 in New York.
///
/// Expected: active window, activation instant, date key of the local day
#[test]
fn evaluates_in_configured_timezone() {
    let detector = CalendarEventDetector::new(vec![CalendarAnchor::new(6, 14).unwrap()], 20, New_York);
    let now = Utc.with_ymd_and_hms(2026, 6, 15, 0, 30, 0).unwrap();

    assert!(detector.is_activation_instant(now));
    assert!(detector.is_entry_edge(now));
    assert_eq!(detector.date_key(now), "2026-06-14");

    // June 16 anchor covers the UTC date (June 15) but not the local one
    let late = CalendarEventDetector::new(vec![CalendarAnchor::new(6, 16).unwrap()], 20, New_York);
    assert!(!late.is_active_window(now));
}

/// Tests the exit edge around a June 15 anchor.
///
/// Expected: exit only at 20:00 local on June 17
#[test]
fn exit_edge_fires_on_first_inactive_day() {
    let detector = CalendarEventDetector::new(june_15(), 20, New_York);

    assert!(!detector.is_exit_edge(local(2026, 6, 15, 20, 0)));
    assert!(!detector.is_exit_edge(local(2026, 6, 16, 20, 0)));
    assert!(!detector.is_exit_edge(local(2026, 6, 17, 19, 59)));
    assert!(detector.is_exit_edge(local(2026, 6, 17, 20, 0)));
    assert!(detector.is_exit_edge(local(2026, 6, 17, 20, 59)));
    assert!(!detector.is_exit_edge(local(2026, 6, 18, 20, 0)));
}

/// Tests the exit edge across a year boundary.
///
/// A December 31 anchor is active Dec 30 and Dec 31; January 1 belongs to the next
/// year's materialization and is inactive.
///
/// Expected: exit at 20:00 on January 1
#[test]
fn exit_edge_crosses_year_boundary() {
    let detector = CalendarEventDetector::new(vec![CalendarAnchor::new(12, 31).unwrap()], 20, New_York);

    assert!(detector.is_entry_edge(local(2026, 12, 31, 20, 0)));
    assert!(detector.is_exit_edge(local(2027, 1, 1, 20, 0)));
}

/// Tests the start announcement at the activation hour.
///
/// Re-evaluating every minute of the same hour must not resend.
///
/// Expected: one rename, one announcement, one stored record
#[tokio::test]
async fn announces_start_once_per_day() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let directory = town_square();
    let announcer = Arc::new(FakeAnnouncer::new());
    let service = service(db, june_15(), directory.clone(), announcer.clone());

    let report = service.process(local(2026, 6, 14, 20, 0)).await?;
    assert_eq!(report.started, vec![CHANNEL]);

    for minute in 1..60 {
        let report = service.process(local(2026, 6, 14, 20, minute)).await?;
        assert!(report.started.is_empty());
    }

    assert_eq!(announcer.count(AnnouncementType::Start), 1);
    assert_eq!(directory.name_of(CHANNEL).as_deref(), Some("blood-moon"));
    assert!(
        AnnouncementRepository::new(db)
            .has_been_sent(CHANNEL, AnnouncementType::Start, "2026-06-14")
            .await?
    );

    Ok(())
}

/// Tests that nothing happens outside the activation hour.
///
/// Expected: no announcement at 19:59 or 21:00 on an active day
#[tokio::test]
async fn ignores_active_day_outside_activation_hour() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let announcer = Arc::new(FakeAnnouncer::new());
    let service = service(db, june_15(), town_square(), announcer.clone());

    service.process(local(2026, 6, 14, 19, 59)).await?;
    service.process(local(2026, 6, 14, 21, 0)).await?;

    assert!(announcer.sent().is_empty());

    Ok(())
}

/// Tests a full window followed by the exit edge.
///
/// Expected: start on each active day, one end on June 17, channel name restored
#[tokio::test]
async fn announces_end_after_window() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let directory = town_square();
    let announcer = Arc::new(FakeAnnouncer::new());
    let service = service(db, june_15(), directory.clone(), announcer.clone());

    for day in 13..=18 {
        service.process(local(2026, 6, day, 20, 0)).await?;
        service.process(local(2026, 6, day, 20, 30)).await?;
    }

    assert_eq!(announcer.count(AnnouncementType::Start), 3);
    assert_eq!(announcer.count(AnnouncementType::End), 1);
    assert_eq!(directory.name_of(CHANNEL).as_deref(), Some("town-square"));
    assert!(
        AnnouncementRepository::new(db)
            .has_been_sent(CHANNEL, AnnouncementType::End, "2026-06-17")
            .await?
    );

    Ok(())
}

/// Tests an end announcement whose rename fails.
///
/// The channel is not announced or recorded, so a later tick within the hour retries
/// once the rename succeeds.
///
/// Expected: first tick reports the channel as failed, retry announces the end
#[tokio::test]
async fn retries_end_when_rename_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let directory = Arc::new(
        FakeChannelDirectory::new()
            .with_channel(CHANNEL, "blood-moon", true)
            .failing_rename(CHANNEL),
    );
    let announcer = Arc::new(FakeAnnouncer::new());
    let service = service(db, june_15(), directory.clone(), announcer.clone());

    let report = service.process(local(2026, 6, 17, 20, 0)).await?;
    assert_eq!(report.failed, vec![CHANNEL]);
    assert_eq!(announcer.count(AnnouncementType::End), 0);

    directory.clear_failures();

    let report = service.process(local(2026, 6, 17, 20, 1)).await?;
    assert_eq!(report.ended, vec![CHANNEL]);
    assert_eq!(announcer.count(AnnouncementType::End), 1);

    Ok(())
}

/// Tests a start announcement that fails to post.
///
/// Expected: nothing recorded, next tick announces and records
#[tokio::test]
async fn retries_start_when_announcement_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let announcer = Arc::new(FakeAnnouncer::new().failing_channel(CHANNEL));
    let service = service(db, june_15(), town_square(), announcer.clone());

    let report = service.process(local(2026, 6, 14, 20, 0)).await?;
    assert_eq!(report.failed, vec![CHANNEL]);
    assert!(
        !AnnouncementRepository::new(db)
            .has_been_sent(CHANNEL, AnnouncementType::Start, "2026-06-14")
            .await?
    );

    announcer.clear_failures();

    let report = service.process(local(2026, 6, 14, 20, 1)).await?;
    assert_eq!(report.started, vec![CHANNEL]);

    Ok(())
}

/// Tests a restart within the activation hour.
///
/// A fresh service over the same database sees the stored record.
///
/// Expected: no second start announcement
#[tokio::test]
async fn restart_does_not_resend() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = Arc::new(FakeAnnouncer::new());
    service(db, june_15(), town_square(), first.clone())
        .process(local(2026, 6, 14, 20, 0))
        .await?;

    let second = Arc::new(FakeAnnouncer::new());
    service(db, june_15(), town_square(), second.clone())
        .process(local(2026, 6, 14, 20, 5))
        .await?;

    assert_eq!(first.count(AnnouncementType::Start), 1);
    assert!(second.sent().is_empty());

    Ok(())
}

/// Tests two workers evaluating the same tick concurrently.
///
/// Both share the idempotency store; only the worker that claims the key posts.
///
/// Expected: exactly one start announcement across both workers
#[tokio::test]
async fn concurrent_workers_announce_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = Arc::new(FakeAnnouncer::new());
    let second = Arc::new(FakeAnnouncer::new());
    let first_service = service(db, june_15(), town_square(), first.clone());
    let second_service = service(db, june_15(), town_square(), second.clone());

    let now = local(2026, 6, 14, 20, 0);
    let (a, b) = tokio::join!(first_service.process(now), second_service.process(now));
    let (a, b) = (a?, b?);

    assert_eq!(
        first.count(AnnouncementType::Start) + second.count(AnnouncementType::Start),
        1
    );
    assert_eq!(a.started.len() + b.started.len(), 1);
    assert!(a.failed.is_empty() && b.failed.is_empty());

    Ok(())
}

/// Tests processing without anchors.
///
/// Expected: Err(ConfigErr(EmptyAnchorList))
#[tokio::test]
async fn empty_anchor_list_is_config_error() {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnnouncementRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = service(db, Vec::new(), town_square(), Arc::new(FakeAnnouncer::new()));
    let result = service.process(local(2026, 6, 14, 20, 0)).await;

    assert!(matches!(
        result,
        Err(AppError::ConfigErr(ConfigError::EmptyAnchorList))
    ));
}
