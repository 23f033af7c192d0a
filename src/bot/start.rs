use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    bot::handler::Handler, config::Config, error::AppError, service::activity::SharedActivity,
};

/// Builds the Discord client without connecting.
///
/// The HTTP client is returned separately so the scheduler's Discord adapters can be
/// built before the gateway connection is established.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `activity` - Aggregator fed by the message handler
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready for `start_bot` and its HTTP client
/// - `Err(AppError::DiscordErr)` - Client construction failed
pub async fn init_bot(
    config: &Config,
    activity: SharedActivity,
) -> Result<(Client, Arc<Http>), AppError> {
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;

    let handler = Handler::new(activity);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Connects to the gateway. Blocks until every shard has shut down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
