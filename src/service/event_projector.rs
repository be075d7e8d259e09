use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::CalendarError;
use crate::models::event::NamedEvent;
use crate::service::event_catalog::{EventCatalog, GlyphPicker, RandomGlyphs};

/// Orders a catalog's events around a caller-supplied "today".
pub struct EventProjector<'a> {
    catalog: &'a EventCatalog,
}

impl<'a> EventProjector<'a> {
    pub fn new(catalog: &'a EventCatalog) -> Self {
        Self { catalog }
    }

    /// Events for `today`'s year sorted by date, birthdays ahead of holidays on
    /// a shared date and catalog order otherwise.
    ///
    /// With `remaining_only`, events before `today` are dropped. Today's events
    /// stay. Passed events are not carried into next year.
    pub fn project<G: GlyphPicker + ?Sized>(
        &self,
        today: NaiveDate,
        remaining_only: bool,
        glyphs: &mut G,
    ) -> Result<Vec<NamedEvent>, CalendarError> {
        let mut events = self.catalog.materialize(today.year(), glyphs)?;
        // Stable: equal (date, kind) keep catalog order.
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.kind.cmp(&b.kind)));

        if remaining_only {
            events.retain(|event| event.days_until(today) > -1);
        }
        debug!(%today, remaining_only, count = events.len(), "projected calendar events");
        Ok(events)
    }
}

/// The builtin catalog projected for `today`, with freshly randomized birthday glyphs.
pub fn get_special_events(
    today: NaiveDate,
    remaining_only: bool,
) -> Result<Vec<NamedEvent>, CalendarError> {
    let catalog = EventCatalog::builtin();
    EventProjector::new(&catalog).project(today, remaining_only, &mut RandomGlyphs(rand::rng()))
}
