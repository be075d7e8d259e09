use std::sync::Arc;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serenity::http::Http;
use serenity::model::gateway::GatewayIntents;
use tracing::{info, warn};

use crate::config::BotSettings;
use crate::handlers::alert_sender::{AlertSender, DiscordAlertSender};
use crate::handlers::discord::BotHandler;
use crate::service::rat_service::RatDeck;

/// Calendar date "now" in `timezone`. The only place the bot reads the clock.
pub fn local_today(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

pub async fn run_bot(settings: BotSettings, sync_commands: bool) -> anyhow::Result<()> {
    let rats = RatDeck::load(&settings.rats_file).unwrap_or_else(|err| {
        warn!(%err, "starting without rats");
        RatDeck::default()
    });

    let http = Arc::new(Http::new(&settings.discord_token));
    let alerts = settings.rat_report_channel_id.map(|channel_id| {
        Arc::new(DiscordAlertSender::new(Arc::clone(&http), channel_id)) as Arc<dyn AlertSender>
    });
    if alerts.is_none() {
        warn!("RAT_REPORT_CHANNEL_ID not set; rat reports will be refused");
    }

    let handler = BotHandler::new(rats, alerts, settings.timezone)
        .with_guild(settings.guild_id)
        .with_command_sync(sync_commands);

    // Slash commands and context menus need no privileged intents.
    let intents = GatewayIntents::GUILDS;
    let mut client = serenity::Client::builder(&settings.discord_token, intents)
        .event_handler(handler)
        .await
        .context("Error creating Serenity client")?;

    info!(timezone = %settings.timezone, "starting bot");
    client.start().await.context("Client error")?;
    Ok(())
}
