use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serenity::all::{
    Command, CommandDataOptionValue, CommandInteraction, CommandOptionType, CommandType,
    GuildId, Interaction as DiscordInteraction, ResolvedTarget,
};
use serenity::async_trait;
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::handlers::alert_sender::AlertSender;
use crate::handlers::discord_responder::{InteractionResponder, Reply, SerenityResponder};
use crate::models::rat::RAT_EMBED_TITLE;
use crate::runtime::local_today;
use crate::service::calendar_message_service::CalendarMessageService;
use crate::service::event_catalog::{EventCatalog, RandomGlyphs};
use crate::service::event_projector::EventProjector;
use crate::service::rat_service::{RatDeck, ReportLog, ReportOutcome};

pub const CALENDAR_COMMAND: &str = "calendar";
pub const RAT_COMMAND: &str = "rat";
pub const REPORT_RAT_COMMAND: &str = "Report Rat";
pub const PROFILE_PIC_COMMAND: &str = "Profile pic";

pub struct BotHandler {
    catalog: Arc<EventCatalog>,
    rats: Arc<Mutex<RatDeck>>,
    reports: Arc<Mutex<ReportLog>>,
    alerts: Option<Arc<dyn AlertSender>>,
    timezone: Tz,
    guild_id: Option<u64>,
    sync_commands: bool,
}

impl BotHandler {
    pub fn new(rats: RatDeck, alerts: Option<Arc<dyn AlertSender>>, timezone: Tz) -> Self {
        BotHandler {
            catalog: Arc::new(EventCatalog::builtin()),
            rats: Arc::new(Mutex::new(rats)),
            reports: Arc::new(Mutex::new(ReportLog::new())),
            alerts,
            timezone,
            guild_id: None,
            sync_commands: false,
        }
    }

    pub fn with_catalog(mut self, catalog: EventCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Register commands on this guild only instead of globally.
    pub fn with_guild(mut self, guild_id: Option<u64>) -> Self {
        self.guild_id = guild_id;
        self
    }

    /// Overwrite the registered command list on every connect.
    pub fn with_command_sync(mut self, sync_commands: bool) -> Self {
        self.sync_commands = sync_commands;
        self
    }

    pub fn syncs_commands(&self) -> bool {
        self.sync_commands
    }

    pub fn commands() -> Vec<CreateCommand> {
        vec![
            CreateCommand::new(CALENDAR_COMMAND)
                .description("Upcoming birthdays and holidays")
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::Boolean,
                        "all",
                        "Include events that already passed this year",
                    )
                    .required(false),
                ),
            CreateCommand::new(RAT_COMMAND).description("Roll a rat 🐀"),
            CreateCommand::new(REPORT_RAT_COMMAND).kind(CommandType::Message),
            CreateCommand::new(PROFILE_PIC_COMMAND).kind(CommandType::User),
        ]
    }
}

impl BotHandler {
    pub async fn handle_calendar_with<R: InteractionResponder + ?Sized>(
        &self,
        responder: &R,
        today: NaiveDate,
        show_all: bool,
    ) {
        let remaining_only = !show_all;
        let projected = EventProjector::new(&self.catalog).project(
            today,
            remaining_only,
            &mut RandomGlyphs(rand::rng()),
        );

        match projected {
            Ok(events) => {
                let message = CalendarMessageService::build_message(&events, today, remaining_only);
                responder
                    .reply(Reply::new(message.title).description(message.description))
                    .await;
            }
            Err(err) => {
                error!(%today, %err, "calendar projection failed");
                responder
                    .reply(
                        Reply::new("Couldn't build the calendar 😵")
                            .description(err.to_string())
                            .ephemeral(),
                    )
                    .await;
            }
        }
    }

    pub async fn handle_rat_with<R: InteractionResponder + ?Sized>(&self, responder: &R) {
        let next = {
            let mut rats = self.rats.lock().await;
            rats.next_rat(&mut rand::rng()).map(str::to_string)
        };

        match next {
            Some(link) => {
                responder
                    .reply(Reply::new(RAT_EMBED_TITLE).image(link))
                    .await
            }
            None => {
                responder
                    .reply(Reply::new("No rats loaded right now 🕳️").ephemeral())
                    .await
            }
        }
    }

    pub async fn handle_report_with<R: InteractionResponder + ?Sized>(
        &self,
        responder: &R,
        embed_title: Option<&str>,
        image_url: Option<&str>,
        reported_by: &str,
    ) {
        let outcome = {
            let mut reports = self.reports.lock().await;
            reports.file(embed_title, image_url, reported_by, Utc::now())
        };

        let report_id = match outcome {
            ReportOutcome::NotARat => {
                responder
                    .reply(Reply::new("This isn't a rat post.").ephemeral())
                    .await;
                return;
            }
            ReportOutcome::AlreadyReported => {
                responder
                    .reply(
                        Reply::new("This rat was recently reported, thank you though!")
                            .description("*you flippin' narc..* 📸"),
                    )
                    .await;
                return;
            }
            ReportOutcome::Filed(id) => id,
        };

        let link = image_url.unwrap_or_default();
        info!(report = %report_id, %link, %reported_by, "rat reported");
        let alert = Reply::new("Rat report").description(format!(
            "{}\nreported by <{}> (report {})",
            link, reported_by, report_id
        ));
        let delivered = match &self.alerts {
            Some(alerts) => alerts.send_alert(&alert).await,
            None => Err("no report channel configured".to_string()),
        };

        if let Err(err) = delivered {
            warn!(report = %report_id, %err, "failed to deliver rat report");
            self.reports.lock().await.forget(&report_id);
            responder
                .reply(Reply::new("Couldn't reach the rat wranglers, try again later.").ephemeral())
                .await;
            return;
        }

        responder
            .reply(
                Reply::new("Thanks for the report!")
                    .description("We'll take him out back.. 😵")
                    .ephemeral(),
            )
            .await;
    }

    pub async fn handle_profile_pic_with<R: InteractionResponder + ?Sized>(
        &self,
        responder: &R,
        user_name: &str,
        avatar_url: String,
    ) {
        responder
            .reply(Reply::new(user_name).image(avatar_url))
            .await;
    }

    async fn handle_command(&self, ctx: &Context, command: &CommandInteraction) {
        let responder = SerenityResponder::for_command(ctx, command);
        debug!(command = %command.data.name, user = %command.user.id, "command received");

        match command.data.name.as_str() {
            CALENDAR_COMMAND => {
                let show_all = command
                    .data
                    .options
                    .iter()
                    .find(|opt| opt.name == "all")
                    .and_then(|opt| match &opt.value {
                        CommandDataOptionValue::Boolean(b) => Some(*b),
                        _ => None,
                    })
                    .unwrap_or(false);
                let today = local_today(self.timezone);
                self.handle_calendar_with(&responder, today, show_all).await;
            }
            RAT_COMMAND => self.handle_rat_with(&responder).await,
            REPORT_RAT_COMMAND => {
                let Some(ResolvedTarget::Message(message)) = command.data.target() else {
                    return;
                };
                let embed = message.embeds.first();
                let title = embed.and_then(|e| e.title.as_deref());
                let image = embed.and_then(|e| e.image.as_ref()).map(|i| i.url.as_str());
                let reporter = format!("@{}", command.user.id);
                self.handle_report_with(&responder, title, image, &reporter)
                    .await;
            }
            PROFILE_PIC_COMMAND => {
                let Some(ResolvedTarget::User(user, _)) = command.data.target() else {
                    return;
                };
                // face() falls back to the default avatar for users without one.
                self.handle_profile_pic_with(&responder, &user.name, user.face())
                    .await;
            }
            other => debug!(command = other, "ignoring unknown command"),
        }
    }
}

#[async_trait]
impl EventHandler for BotHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, id = %ready.user.id, "connected");

        if !self.sync_commands {
            debug!("command sync disabled, keeping registered commands");
            return;
        }

        let registered = match self.guild_id {
            Some(id) => {
                GuildId::new(id)
                    .set_commands(&ctx.http, Self::commands())
                    .await
            }
            None => Command::set_global_commands(&ctx.http, Self::commands()).await,
        };
        match registered {
            Ok(commands) => info!(count = commands.len(), guild = ?self.guild_id, "registered commands"),
            Err(err) => error!(?err, "failed to register commands"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: DiscordInteraction) {
        if let DiscordInteraction::Command(command) = interaction {
            self.handle_command(&ctx, &command).await;
        }
    }
}
