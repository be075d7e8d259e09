use std::sync::Arc;

use serenity::async_trait;
use serenity::builder::CreateMessage;
use serenity::http::Http;
use serenity::model::id::ChannelId;

use crate::handlers::discord_responder::Reply;

/// Where moderation alerts (rat reports) are posted.
#[async_trait]
pub trait AlertSender: Send + Sync {
    async fn send_alert(&self, alert: &Reply) -> Result<(), String>;
}

pub struct DiscordAlertSender {
    http: Arc<Http>,
    channel_id: u64,
}

impl DiscordAlertSender {
    pub fn new(http: Arc<Http>, channel_id: u64) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl AlertSender for DiscordAlertSender {
    async fn send_alert(&self, alert: &Reply) -> Result<(), String> {
        ChannelId::new(self.channel_id)
            .send_message(self.http.as_ref(), CreateMessage::new().embed(alert.to_embed()))
            .await
            .map_err(|e| format!("Error sending alert: {:?}", e))?;
        Ok(())
    }
}
