use std::fmt;

use chrono::{Days, NaiveDate, Weekday};
use serde::Serialize;

/// Kind of a calendar event. Birthdays sort ahead of holidays on a shared date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Birthday,
    Holiday,
}

/// How a recurring event lands on a concrete date in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    Fixed { month: u32, day: u32 },
    /// The `nth` occurrence (1-based) of `weekday` in `month`.
    NthWeekday { nth: u8, weekday: Weekday, month: u32 },
}

/// A recurring event before it has been pinned to a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTemplate {
    pub name: &'static str,
    pub rule: DateRule,
    pub kind: EventKind,
    pub glyph: Option<&'static str>,
}

impl EventTemplate {
    pub const fn birthday(name: &'static str, month: u32, day: u32) -> Self {
        Self {
            name,
            rule: DateRule::Fixed { month, day },
            kind: EventKind::Birthday,
            glyph: None,
        }
    }

    pub const fn holiday(name: &'static str, glyph: &'static str, rule: DateRule) -> Self {
        Self {
            name,
            rule,
            kind: EventKind::Holiday,
            glyph: Some(glyph),
        }
    }
}

/// A materialized event with a resolved date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedEvent {
    pub name: String,
    pub label: String,
    pub date: NaiveDate,
    pub kind: EventKind,
}

impl NamedEvent {
    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    pub fn is_tomorrow(&self, today: NaiveDate) -> bool {
        today.checked_add_days(Days::new(1)) == Some(self.date)
    }

    /// Signed number of days from `today` to the event; negative once it has passed.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }
}

impl fmt::Display for NamedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
