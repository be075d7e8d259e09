pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod runtime;
pub mod service;

pub use error::CalendarError;
pub use models::event::{EventKind, NamedEvent};
pub use service::event_projector::get_special_events;
