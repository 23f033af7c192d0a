//! World event tick loop.
//!
//! Every tick runs the Blood Moon calendar service and the raid encounter trigger as
//! two independent tasks. Each runs under its own timeout and busy guard, and any
//! error, panic or timeout is logged and recorded in the [`TickReport`] without
//! affecting the other detector or the next tick.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::EventConfig,
    data::announcement::AnnouncementRepository,
    error::AppError,
    model::encounter::TriggerOutcome,
    service::{calendar::CalendarEventService, encounter::EncounterTrigger},
};

/// How one detector's run within a tick ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorStatus {
    Completed,
    /// The detector's previous run was still in flight.
    Skipped,
    /// Returned an error or panicked.
    Failed(String),
    /// Cancelled after exceeding the tick timeout.
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub calendar: DetectorStatus,
    pub encounter: DetectorStatus,
}

/// Runs both detectors for one tick.
pub struct TickRunner {
    calendar: Arc<CalendarEventService>,
    encounter: Arc<EncounterTrigger>,
    timeout: Duration,
    calendar_busy: Arc<Mutex<()>>,
    encounter_busy: Arc<Mutex<()>>,
}

impl TickRunner {
    pub fn new(
        calendar: Arc<CalendarEventService>,
        encounter: Arc<EncounterTrigger>,
        timeout: Duration,
    ) -> Self {
        Self {
            calendar,
            encounter,
            timeout,
            calendar_busy: Arc::new(Mutex::new(())),
            encounter_busy: Arc::new(Mutex::new(())),
        }
    }

    /// Evaluates both detectors at `now` and waits for them to finish.
    pub async fn run_tick(&self, now: DateTime<Utc>) -> TickReport {
        let calendar = self.calendar.clone();
        let calendar_run = run_detector(
            "calendar",
            self.calendar_busy.clone(),
            self.timeout,
            async move {
                let report = calendar.process(now).await?;
                if !report.started.is_empty() || !report.ended.is_empty() {
                    tracing::info!(
                        "Blood Moon tick: {} started, {} ended",
                        report.started.len(),
                        report.ended.len()
                    );
                }
                if !report.failed.is_empty() {
                    tracing::warn!(
                        "Blood Moon tick left channels pending: {:?}",
                        report.failed
                    );
                }
                Ok(())
            },
        );

        let encounter = self.encounter.clone();
        let encounter_run = run_detector(
            "encounter",
            self.encounter_busy.clone(),
            self.timeout,
            async move {
                let outcome = encounter.evaluate(now).await?;
                if outcome.fired() {
                    // The trigger logs the raid itself
                    tracing::debug!("Raid cooldown restarted at {}", now);
                    return Ok(());
                }

                match outcome {
                    TriggerOutcome::SkippedCooldown { remaining } => {
                        tracing::trace!("Raid cooldown active, {}s remaining", remaining.num_seconds())
                    }
                    TriggerOutcome::SkippedBelowThreshold {
                        total_messages,
                        total_unique_users,
                    } => tracing::trace!(
                        "Raid activity below threshold: {} messages, {} users",
                        total_messages,
                        total_unique_users
                    ),
                    TriggerOutcome::FailedNoMonster { .. } | TriggerOutcome::Dispatched { .. } => {}
                }
                Ok(())
            },
        );

        let (calendar, encounter) = tokio::join!(calendar_run, encounter_run);

        TickReport {
            calendar,
            encounter,
        }
    }
}

/// Runs one detector body as its own task under the busy guard and timeout.
async fn run_detector<F>(
    name: &'static str,
    busy: Arc<Mutex<()>>,
    timeout: Duration,
    work: F,
) -> DetectorStatus
where
    F: Future<Output = Result<(), AppError>> + Send + 'static,
{
    let Ok(guard) = busy.try_lock_owned() else {
        tracing::warn!("Skipping {} detector, previous run still in progress", name);
        return DetectorStatus::Skipped;
    };

    let handle = tokio::spawn(async move {
        let _guard = guard;
        tokio::time::timeout(timeout, work).await
    });

    match handle.await {
        Ok(Ok(Ok(()))) => DetectorStatus::Completed,
        Ok(Ok(Err(e))) => {
            tracing::error!("Error running {} detector: {}", name, e);
            DetectorStatus::Failed(e.to_string())
        }
        Ok(Err(_)) => {
            tracing::error!("{} detector timed out after {:?}", name, timeout);
            DetectorStatus::TimedOut
        }
        Err(e) => {
            tracing::error!("{} detector panicked: {}", name, e);
            DetectorStatus::Failed(format!("panicked: {}", e))
        }
    }
}

/// Gate in front of the tick runner that supports graceful shutdown.
pub struct TickDriver {
    runner: TickRunner,
    closed: AtomicBool,
    /// Held shared by every running tick; `close` takes it exclusively to drain them.
    in_flight: RwLock<()>,
}

impl TickDriver {
    pub fn new(runner: TickRunner) -> Self {
        Self {
            runner,
            closed: AtomicBool::new(false),
            in_flight: RwLock::new(()),
        }
    }

    /// Runs one tick unless the driver is closed.
    ///
    /// # Returns
    /// - `Some(TickReport)` - Status of each detector
    /// - `None` - The driver was closed; nothing ran
    pub async fn tick(&self, now: DateTime<Utc>) -> Option<TickReport> {
        if self.is_closed() {
            return None;
        }

        let _in_flight = self.in_flight.read().await;

        // Closed while waiting for the lock
        if self.is_closed() {
            return None;
        }

        Some(self.runner.run_tick(now).await)
    }

    /// Stops new ticks and waits for in-flight ticks to finish.
    pub async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let _drained = self.in_flight.write().await;
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Deletes announcement records older than the retention window.
pub async fn sweep_announcements(
    db: &DatabaseConnection,
    retention: chrono::Duration,
    now: DateTime<Utc>,
) -> Result<u64, AppError> {
    let repo = AnnouncementRepository::new(db);
    let deleted = repo.cleanup(retention, now).await?;

    tracing::info!(
        "Removed {} announcement records older than {} days",
        deleted,
        retention.num_days()
    );

    Ok(deleted)
}

/// Owns the job scheduler running the tick and retention jobs.
pub struct EventScheduler {
    scheduler: JobScheduler,
    driver: Arc<TickDriver>,
}

impl EventScheduler {
    /// Starts the world event scheduler
    ///
    /// Registers two jobs:
    /// - A repeated tick at `tick_interval` running both detectors
    /// - The announcement retention sweep on `cleanup_schedule`
    ///
    /// # Arguments
    /// - `driver`: Tick driver shared with the shutdown path
    /// - `db`: Database connection for the retention sweep
    /// - `config`: Event configuration
    pub async fn start(
        driver: Arc<TickDriver>,
        db: DatabaseConnection,
        config: &EventConfig,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new().await?;

        let job_driver = driver.clone();
        let tick_job = Job::new_repeated_async(config.tick_interval, move |_uuid, _lock| {
            let driver = job_driver.clone();

            Box::pin(async move {
                if driver.tick(Utc::now()).await.is_none() {
                    tracing::debug!("World event tick skipped, scheduler is shutting down");
                }
            })
        })?;

        let retention = config.announcement_retention;
        let cleanup_job = Job::new_async(config.cleanup_schedule.as_str(), move |_uuid, _lock| {
            let db = db.clone();

            Box::pin(async move {
                if let Err(e) = sweep_announcements(&db, retention, Utc::now()).await {
                    tracing::error!("Error cleaning up announcement records: {}", e);
                }
            })
        })?;

        scheduler.add(tick_job).await?;
        scheduler.add(cleanup_job).await?;
        scheduler.start().await?;

        tracing::info!(
            "World event scheduler started (tick every {:?}, cleanup '{}')",
            config.tick_interval,
            config.cleanup_schedule
        );

        Ok(Self { scheduler, driver })
    }

    /// Closes the tick driver, waits for in-flight ticks, then stops the jobs.
    pub async fn stop(&mut self) -> Result<(), AppError> {
        self.driver.close().await;
        self.scheduler.shutdown().await?;

        tracing::info!("World event scheduler stopped");

        Ok(())
    }
}
