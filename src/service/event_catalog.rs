use chrono::Weekday;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::CalendarError;
use crate::models::event::{DateRule, EventKind, EventTemplate, NamedEvent};
use crate::service::date_rules;
use crate::service::text::make_possessive;

pub const BIRTHDAY_GLYPHS: &[&str] = &["🧁", "🎂", "🍰", "🎉", "🥳", "🎁"];

const BUILTIN_EVENTS: &[EventTemplate] = &[
    EventTemplate::birthday("Marcos", 2, 3),
    EventTemplate::birthday("Hudson", 2, 14),
    EventTemplate::birthday("Chris", 4, 21),
    EventTemplate::birthday("Alex", 4, 15),
    EventTemplate::birthday("Vynle", 5, 9),
    EventTemplate::birthday("Justin", 6, 12),
    EventTemplate::birthday("Josh", 6, 27),
    EventTemplate::birthday("Matt", 9, 24),
    EventTemplate::birthday("Hobo", 9, 11),
    EventTemplate::birthday("Conrad", 10, 2),
    EventTemplate::holiday("Valentine's Day", "💕", DateRule::Fixed { month: 2, day: 14 }),
    EventTemplate::holiday("Freedom Day", "🎇", DateRule::Fixed { month: 7, day: 4 }),
    EventTemplate::holiday("Halloween", "🎃", DateRule::Fixed { month: 10, day: 31 }),
    EventTemplate::holiday(
        "Thanksgiving",
        "🦃",
        DateRule::NthWeekday {
            nth: 4,
            weekday: Weekday::Thu,
            month: 11,
        },
    ),
    EventTemplate::holiday("Christmas", "🎄", DateRule::Fixed { month: 12, day: 25 }),
    EventTemplate::holiday("New Year's Eve", "🥳", DateRule::Fixed { month: 12, day: 31 }),
];

/// Source of decorative glyphs for birthday labels.
pub trait GlyphPicker {
    fn pick(&mut self, glyphs: &[&'static str]) -> &'static str;
}

/// Uniform random pick from any `rand` generator.
pub struct RandomGlyphs<R>(pub R);

impl<R: Rng> GlyphPicker for RandomGlyphs<R> {
    fn pick(&mut self, glyphs: &[&'static str]) -> &'static str {
        glyphs.choose(&mut self.0).copied().unwrap_or_default()
    }
}

/// Always picks the glyph at the given index (clamped to the last one).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGlyph(pub usize);

impl GlyphPicker for FixedGlyph {
    fn pick(&mut self, glyphs: &[&'static str]) -> &'static str {
        glyphs
            .get(self.0)
            .or_else(|| glyphs.last())
            .copied()
            .unwrap_or_default()
    }
}

/// Immutable table of recurring events.
#[derive(Debug, Clone)]
pub struct EventCatalog {
    templates: Vec<EventTemplate>,
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EventCatalog {
    pub fn new(templates: Vec<EventTemplate>) -> Self {
        Self { templates }
    }

    /// The server's birthdays and holidays.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_EVENTS.to_vec())
    }

    /// Pins every template to `year`, in catalog order. The first template that
    /// cannot be resolved fails the whole call.
    pub fn materialize<G: GlyphPicker + ?Sized>(
        &self,
        year: i32,
        glyphs: &mut G,
    ) -> Result<Vec<NamedEvent>, CalendarError> {
        self.templates
            .iter()
            .map(|template| {
                let date = date_rules::resolve(template.name, template.rule, year)?;
                Ok(NamedEvent {
                    name: template.name.to_string(),
                    label: label_for(template, glyphs),
                    date,
                    kind: template.kind,
                })
            })
            .collect()
    }
}

fn label_for<G: GlyphPicker + ?Sized>(template: &EventTemplate, glyphs: &mut G) -> String {
    match (template.kind, template.glyph) {
        (EventKind::Birthday, _) => format!(
            "{} birthday {}",
            make_possessive(template.name),
            glyphs.pick(BIRTHDAY_GLYPHS)
        ),
        (EventKind::Holiday, Some(glyph)) => format!("{} {}", template.name, glyph),
        (EventKind::Holiday, None) => template.name.to_string(),
    }
}
