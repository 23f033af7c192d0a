//! Error types for the world events engine.
//!
//! `AppError` is the top-level error returned by services, repositories and startup
//! code. Detector errors never escape the scheduler: each tick catches them at
//! per-detector granularity and logs them, so these types surface only in
//! operational logs.

pub mod config;
pub mod external;

use thiserror::Error;

use crate::error::{config::ConfigError, external::ExternalError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most
/// variants use `#[from]` for automatic conversion with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or while evaluating a tick.
    ///
    /// Fatal at startup; tick-local when raised by a detector (the tick is
    /// skipped and the next one runs normally).
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Failure reported by an external collaborator (Discord, catalog).
    ///
    /// Not retried within the tick; the next scheduled tick retries naturally.
    #[error(transparent)]
    ExternalErr(#[from] ExternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal error with custom message.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
