//! Error types for the calendar engine, configuration and rat loading.

use chrono::Weekday;
use thiserror::Error;

/// Failure to pin a recurring event to a concrete date. Aborts the whole query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("{name}: {year}-{month:02}-{day:02} is not a valid date")]
    InvalidDate {
        name: String,
        year: i32,
        month: u32,
        day: u32,
    },

    #[error("{name}: there is no occurrence #{nth} of {weekday} in {year}-{month:02}")]
    RuleResolution {
        name: String,
        year: i32,
        month: u32,
        nth: u8,
        weekday: Weekday,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config line {line}: {content}")]
    MalformedLine { line: usize, content: String },

    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum RatError {
    #[error("failed to read rat list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
