use chrono::NaiveDate;

use crate::models::event::NamedEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMessage {
    pub title: String,
    pub description: String,
}

pub struct CalendarMessageService;

impl CalendarMessageService {
    pub fn build_message(
        events: &[NamedEvent],
        today: NaiveDate,
        remaining_only: bool,
    ) -> CalendarMessage {
        let title = if remaining_only {
            "Upcoming events 📅".to_string()
        } else {
            format!("Events in {} 📅", today.format("%Y"))
        };

        if events.is_empty() {
            return CalendarMessage {
                title,
                description: "Nothing left on the calendar this year.".to_string(),
            };
        }

        let lines: Vec<String> = events.iter().map(|event| render_line(event, today)).collect();
        CalendarMessage {
            title,
            description: lines.join("\n"),
        }
    }
}

pub fn render_line(event: &NamedEvent, today: NaiveDate) -> String {
    let when = event.date.format("%b %-d");
    if event.is_today(today) {
        return format!("**{}** is today!", event.label);
    }
    if event.is_tomorrow(today) {
        return format!("**{}** is tomorrow ({})", event.label, when);
    }
    match event.days_until(today) {
        days if days < 0 => format!("~~{}~~ {} ({} days ago)", event.label, when, -days),
        days => format!("**{}** in {} days ({})", event.label, days, when),
    }
}
