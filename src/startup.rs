use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Config, EventConfig},
    error::AppError,
    scheduler::world_events::{TickDriver, TickRunner},
    service::{
        activity::SharedActivity,
        calendar::{CalendarEventDetector, CalendarEventService},
        channel_toggle::ChannelPresentationToggle,
        discord::{DiscordAnnouncer, DiscordChannelDirectory},
        encounter::{EncounterSettings, EncounterTrigger},
        monster::DatabaseMonsterCatalog,
        raid::DiscordRaidDispatcher,
    },
};

/// Installs the global tracing subscriber.
///
/// Defaults to `info`; override with `RUST_LOG` (e.g. `RUST_LOG=world_events=debug`).
pub fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Wires the detectors to their Discord and database collaborators.
///
/// Restores the raid cooldown from the database before returning. Missing anchors or
/// villages are reported here once; the detectors keep reporting them per tick.
///
/// # Returns
/// - `Ok(TickDriver)` - Driver ready to be handed to the scheduler
/// - `Err(AppError::DbErr)` - Failed to restore the raid cooldown
pub async fn build_tick_driver(
    config: &EventConfig,
    db: &DatabaseConnection,
    http: Arc<Http>,
    activity: SharedActivity,
) -> Result<TickDriver, AppError> {
    if config.blood_moon_anchors.is_empty() {
        tracing::warn!("BLOOD_MOON_ANCHORS is empty, Blood Moon detection will fail every tick");
    }
    if config.villages.is_empty() {
        tracing::warn!("VILLAGES is empty, raids cannot be triggered");
    }

    let calendar = CalendarEventService::new(
        db.clone(),
        CalendarEventDetector::new(
            config.blood_moon_anchors.clone(),
            config.activation_hour,
            config.timezone,
        ),
        config.blood_moon_channels.clone(),
        ChannelPresentationToggle::new(Arc::new(DiscordChannelDirectory::new(http.clone()))),
        Arc::new(DiscordAnnouncer::new(http.clone())),
    );

    let encounter = EncounterTrigger::new(
        db.clone(),
        EncounterSettings::from_config(config),
        config.villages.clone(),
        activity,
        Arc::new(DatabaseMonsterCatalog::new(db.clone())),
        Arc::new(DiscordRaidDispatcher::new(db.clone(), http)),
    );
    encounter.restore().await?;

    Ok(TickDriver::new(TickRunner::new(
        Arc::new(calendar),
        Arc::new(encounter),
        config.tick_timeout,
    )))
}
