use async_trait::async_trait;
use serenity::{
    all::{Channel, ChannelId, EditChannel},
    http::Http,
};
use std::sync::Arc;

use crate::{
    error::external::ExternalError, model::channel::ChannelInfo,
    service::channel_toggle::ChannelDirectory,
};

/// Resolves and renames guild channels through the Discord HTTP API.
pub struct DiscordChannelDirectory {
    http: Arc<Http>,
}

impl DiscordChannelDirectory {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChannelDirectory for DiscordChannelDirectory {
    /// Fetches the channel and computes the bot's effective permissions in it.
    ///
    /// # Returns
    /// - `Ok(ChannelInfo)` - Current name and whether the bot holds Manage Channels
    /// - `Err(ExternalError::NotFound)` - Channel does not exist or is not a guild channel
    /// - `Err(ExternalError::PermissionDenied)` - Bot cannot see the channel
    /// - `Err(ExternalError::Transient)` - Any other API failure
    async fn fetch(&self, channel_id: u64) -> Result<ChannelInfo, ExternalError> {
        let channel = match ChannelId::new(channel_id).to_channel(&self.http).await? {
            Channel::Guild(channel) => channel,
            _ => {
                return Err(ExternalError::NotFound(format!(
                    "channel {} is not a guild channel",
                    channel_id
                )))
            }
        };

        let bot = self.http.get_current_user().await?;
        let guild = channel.guild_id.to_partial_guild(&self.http).await?;
        let member = channel.guild_id.member(&self.http, bot.id).await?;

        let can_manage = guild
            .user_permissions_in(&channel, &member)
            .manage_channels();

        Ok(ChannelInfo {
            name: channel.name,
            can_manage,
        })
    }

    async fn rename(&self, channel_id: u64, name: &str) -> Result<(), ExternalError> {
        ChannelId::new(channel_id)
            .edit(&self.http, EditChannel::new().name(name))
            .await?;

        Ok(())
    }
}
