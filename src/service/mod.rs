pub mod calendar_message_service;
pub mod date_rules;
pub mod event_catalog;
pub mod event_projector;
pub mod rat_service;
pub mod text;
