use serenity::all::{Context, Message};

use crate::service::activity::SharedActivity;

/// Counts a guild message toward raid activity.
///
/// DMs are ignored. Bot authors and excluded channels are filtered by the aggregator.
pub async fn handle_message(activity: &SharedActivity, _ctx: Context, message: Message) {
    if message.guild_id.is_none() {
        return;
    }

    activity.lock().await.record(
        message.channel_id.get(),
        message.author.id.get(),
        message.author.bot,
        message.timestamp.to_utc(),
    );
}
