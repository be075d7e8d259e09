pub mod alert_sender;
pub mod discord;
pub mod discord_responder;
