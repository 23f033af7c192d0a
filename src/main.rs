mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;

use std::sync::Arc;

use crate::{
    config::Config, error::AppError, scheduler::world_events::EventScheduler,
    service::activity::ActivityAggregator,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;

    let activity = ActivityAggregator::new(
        config.events.activity_window,
        config.events.excluded_channel_ids.clone(),
    )
    .shared();

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) = bot::start::init_bot(&config, activity.clone()).await?;
    let shard_manager = bot_client.shard_manager.clone();

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let driver = Arc::new(
        startup::build_tick_driver(&config.events, &db, discord_http, activity).await?,
    );
    let mut scheduler = EventScheduler::start(driver, db, &config.events).await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to listen for shutdown: {}", e)))?;

    tracing::info!("Shutting down");

    scheduler.stop().await?;
    shard_manager.shutdown_all().await;

    Ok(())
}
