use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
};
use std::sync::Arc;

use crate::{
    data::raid::RaidRepository,
    model::encounter::{CreateRaidParam, RaidOutcome, RaidRequest},
    service::encounter::RaidDispatcher,
};

/// Raid embed color (dark red).
const RAID_COLOR: u32 = 0x8b0000;

/// Opens raids by recording them and posting the alert to the village channel.
pub struct DiscordRaidDispatcher {
    db: DatabaseConnection,
    http: Arc<Http>,
}

impl DiscordRaidDispatcher {
    pub fn new(db: DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    fn build_message(request: &RaidRequest) -> CreateMessage {
        let embed = CreateEmbed::new()
            .title(format!("⚔️ {} is under attack!", request.village.name))
            .description(format!(
                "A tier {} **{}** has descended on {}. Rally to defend the village!",
                request.monster.tier, request.monster.name, request.village.name
            ))
            .field("Region", &request.village.region, true)
            .field("Tier", request.monster.tier.to_string(), true)
            .color(RAID_COLOR)
            .timestamp(Timestamp::now());

        CreateMessage::new().embed(embed)
    }
}

#[async_trait]
impl RaidDispatcher for DiscordRaidDispatcher {
    async fn trigger(&self, request: RaidRequest) -> RaidOutcome {
        let repo = RaidRepository::new(&self.db);
        let raid = match repo
            .create(CreateRaidParam {
                monster_name: request.monster.name.clone(),
                monster_tier: request.monster.tier,
                village: request.village.name.clone(),
                channel_id: request.channel_id,
                is_automated: request.is_automated,
                created_at: Utc::now(),
            })
            .await
        {
            Ok(raid) => raid,
            Err(e) => return RaidOutcome::failed(format!("failed to record raid: {}", e)),
        };

        let channel_id = ChannelId::new(request.channel_id);
        match channel_id
            .send_message(&self.http, Self::build_message(&request))
            .await
        {
            Ok(_) => {
                tracing::debug!("Posted raid {} to channel {}", raid.id, request.channel_id);
                RaidOutcome::succeeded()
            }
            Err(e) => RaidOutcome::failed(format!(
                "raid {} recorded but alert to channel {} failed: {}",
                raid.id, request.channel_id, e
            )),
        }
    }
}
