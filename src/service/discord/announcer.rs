use async_trait::async_trait;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
};
use std::sync::Arc;

use crate::{
    error::external::ExternalError, model::announcement::AnnouncementType,
    service::calendar::Announcer,
};

/// Embed color while the Blood Moon rises (crimson).
const START_COLOR: u32 = 0xdc143c;
/// Embed color once the Blood Moon fades (slate).
const END_COLOR: u32 = 0x708090;

/// Posts Blood Moon announcements as embeds.
pub struct DiscordAnnouncer {
    http: Arc<Http>,
}

impl DiscordAnnouncer {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn build_embed(announcement_type: AnnouncementType) -> CreateEmbed {
        let (title, description, color) = match announcement_type {
            AnnouncementType::Start => (
                "🌕 The Blood Moon rises",
                "The sky turns red and monsters grow restless. Stay close to your village \
                 until the moon fades.",
                START_COLOR,
            ),
            AnnouncementType::End => (
                "🌑 The Blood Moon fades",
                "The red light has passed and the land is calm again.",
                END_COLOR,
            ),
        };

        CreateEmbed::new()
            .title(title)
            .description(description)
            .color(color)
            .timestamp(Timestamp::now())
    }
}

#[async_trait]
impl Announcer for DiscordAnnouncer {
    async fn announce(
        &self,
        channel_id: u64,
        announcement_type: AnnouncementType,
    ) -> Result<(), ExternalError> {
        ChannelId::new(channel_id)
            .send_message(
                &self.http,
                CreateMessage::new().embed(Self::build_embed(announcement_type)),
            )
            .await?;

        Ok(())
    }
}
