use std::sync::Arc;

use chrono::NaiveDate;
use goonbot::handlers::alert_sender::AlertSender;
use goonbot::handlers::discord::BotHandler;
use goonbot::handlers::discord_responder::{InteractionResponder, Reply};
use goonbot::models::event::EventTemplate;
use goonbot::service::event_catalog::EventCatalog;
use goonbot::service::rat_service::RatDeck;
use tokio::sync::Mutex;

#[derive(Default)]
struct MockResponder {
    replies: Mutex<Vec<Reply>>,
}

#[serenity::async_trait]
impl InteractionResponder for MockResponder {
    async fn reply(&self, reply: Reply) {
        let mut replies = self.replies.lock().await;
        replies.push(reply);
    }
}

impl MockResponder {
    async fn last(&self) -> Reply {
        self.replies.lock().await.last().cloned().expect("a reply")
    }
}

#[derive(Default)]
struct MockAlerts {
    sent: Mutex<Vec<Reply>>,
    fail: bool,
}

#[serenity::async_trait]
impl AlertSender for MockAlerts {
    async fn send_alert(&self, alert: &Reply) -> Result<(), String> {
        if self.fail {
            return Err("channel unavailable".to_string());
        }
        self.sent.lock().await.push(alert.clone());
        Ok(())
    }
}

const RATS: &str = "https://rats.example/1.png\nhttps://rats.example/2.png\n";

fn handler_with(alerts: Option<Arc<MockAlerts>>) -> BotHandler {
    BotHandler::new(
        RatDeck::parse(RATS),
        alerts.map(|a| a as Arc<dyn AlertSender>),
        chrono_tz::America::New_York,
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn calendar_lists_remaining_events() {
    let handler = handler_with(None);
    let responder = MockResponder::default();

    handler
        .handle_calendar_with(&responder, date(2023, 11, 22), false)
        .await;

    let reply = responder.last().await;
    assert_eq!(reply.title, "Upcoming events 📅");
    assert!(!reply.ephemeral);
    let body = reply.description.unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "**Thanksgiving 🦃** is tomorrow (Nov 23)");
    assert_eq!(lines[1], "**Christmas 🎄** in 33 days (Dec 25)");
}

#[tokio::test]
async fn calendar_all_includes_passed_events() {
    let handler = handler_with(None);
    let responder = MockResponder::default();

    handler
        .handle_calendar_with(&responder, date(2023, 11, 22), true)
        .await;

    let reply = responder.last().await;
    assert_eq!(reply.title, "Events in 2023 📅");
    assert_eq!(reply.description.unwrap().lines().count(), 16);
}

#[tokio::test]
async fn calendar_failure_is_reported_to_the_user() {
    let handler = handler_with(None)
        .with_catalog(EventCatalog::new(vec![EventTemplate::birthday("Leapling", 2, 29)]));
    let responder = MockResponder::default();

    handler
        .handle_calendar_with(&responder, date(2023, 1, 1), false)
        .await;

    let reply = responder.last().await;
    assert!(reply.ephemeral);
    assert_eq!(reply.title, "Couldn't build the calendar 😵");
    assert_eq!(
        reply.description.as_deref(),
        Some("Leapling: 2023-02-29 is not a valid date")
    );
}

#[tokio::test]
async fn rat_serves_images_from_the_deck() {
    let handler = handler_with(None);
    let responder = MockResponder::default();

    handler.handle_rat_with(&responder).await;
    handler.handle_rat_with(&responder).await;

    let replies = responder.replies.lock().await;
    let mut images: Vec<String> = replies
        .iter()
        .map(|r| {
            assert_eq!(r.title, "Rat");
            r.image_url.clone().unwrap()
        })
        .collect();
    images.sort();
    assert_eq!(
        images,
        ["https://rats.example/1.png", "https://rats.example/2.png"]
    );
}

#[tokio::test]
async fn rat_without_deck_replies_privately() {
    let handler = BotHandler::new(RatDeck::default(), None, chrono_tz::UTC);
    let responder = MockResponder::default();

    handler.handle_rat_with(&responder).await;

    let reply = responder.last().await;
    assert!(reply.ephemeral);
    assert_eq!(reply.image_url, None);
}

#[tokio::test]
async fn report_forwards_alert_once() {
    let alerts = Arc::new(MockAlerts::default());
    let handler = handler_with(Some(alerts.clone()));
    let responder = MockResponder::default();
    let link = "https://rats.example/1.png";

    handler
        .handle_report_with(&responder, Some("Rat"), Some(link), "@u")
        .await;
    let reply = responder.last().await;
    assert_eq!(reply.title, "Thanks for the report!");
    assert!(reply.ephemeral);

    handler
        .handle_report_with(&responder, Some("Rat"), Some(link), "@v")
        .await;
    let reply = responder.last().await;
    assert_eq!(reply.title, "This rat was recently reported, thank you though!");

    let sent = alerts.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Rat report");
    assert!(sent[0].description.as_deref().unwrap().starts_with(link));
}

#[tokio::test]
async fn report_rejects_non_rat_messages() {
    let alerts = Arc::new(MockAlerts::default());
    let handler = handler_with(Some(alerts.clone()));
    let responder = MockResponder::default();

    handler
        .handle_report_with(&responder, Some("Profile pic"), Some("https://a.png"), "@u")
        .await;
    handler.handle_report_with(&responder, None, None, "@u").await;

    let replies = responder.replies.lock().await;
    assert_eq!(replies.len(), 2);
    assert!(replies.iter().all(|r| r.title == "This isn't a rat post." && r.ephemeral));
    assert!(alerts.sent.lock().await.is_empty());
}

#[tokio::test]
async fn undelivered_report_can_be_retried() {
    let failing = Arc::new(MockAlerts {
        fail: true,
        ..MockAlerts::default()
    });
    let handler = handler_with(Some(failing));
    let responder = MockResponder::default();
    let link = "https://rats.example/2.png";

    handler
        .handle_report_with(&responder, Some("Rat"), Some(link), "@u")
        .await;
    assert_eq!(
        responder.last().await.title,
        "Couldn't reach the rat wranglers, try again later."
    );

    handler
        .handle_report_with(&responder, Some("Rat"), Some(link), "@u")
        .await;
    assert_eq!(
        responder.last().await.title,
        "Couldn't reach the rat wranglers, try again later."
    );
}

#[tokio::test]
async fn profile_pic_shows_avatar() {
    let handler = handler_with(None);
    let responder = MockResponder::default();

    handler
        .handle_profile_pic_with(&responder, "bexli", "https://cdn.example/a.png".to_string())
        .await;
    let reply = responder.last().await;
    assert_eq!(reply.title, "bexli");
    assert_eq!(reply.image_url.as_deref(), Some("https://cdn.example/a.png"));
    assert!(!reply.ephemeral);
}

#[test]
fn command_sync_is_opt_in() {
    assert!(!handler_with(None).syncs_commands());
    assert!(handler_with(None).with_command_sync(true).syncs_commands());
}

#[test]
fn registers_all_commands() {
    let commands = BotHandler::commands();
    assert_eq!(commands.len(), 4);
    let debug = format!("{:?}", commands);
    for name in ["calendar", "rat", "Report Rat", "Profile pic"] {
        assert!(debug.contains(name), "missing {name}");
    }
}
