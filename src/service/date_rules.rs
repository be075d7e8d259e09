use chrono::{Datelike, Days, NaiveDate};

use crate::error::CalendarError;
use crate::models::event::DateRule;

/// Resolves `rule` for `year`. `name` is only used to label failures.
pub fn resolve(name: &str, rule: DateRule, year: i32) -> Result<NaiveDate, CalendarError> {
    match rule {
        DateRule::Fixed { month, day } => {
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| CalendarError::InvalidDate {
                name: name.to_string(),
                year,
                month,
                day,
            })
        }
        DateRule::NthWeekday {
            nth,
            weekday,
            month,
        } => {
            let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
                CalendarError::InvalidDate {
                    name: name.to_string(),
                    year,
                    month,
                    day: 1,
                }
            })?;
            let unresolved = || CalendarError::RuleResolution {
                name: name.to_string(),
                year,
                month,
                nth,
                weekday,
            };
            if nth == 0 {
                return Err(unresolved());
            }

            // First matching weekday, then whole weeks forward.
            let lead = (7 + weekday.num_days_from_monday()
                - first.weekday().num_days_from_monday())
                % 7;
            let offset = u64::from(lead) + u64::from(nth - 1) * 7;
            first
                .checked_add_days(Days::new(offset))
                .filter(|date| date.month() == month && date.year() == year)
                .ok_or_else(unresolved)
        }
    }
}
