//! Entity types served by calrest.
//!
//! JSON field names follow the public wire format: camelCase, with the
//! identity serialized as `_id`.

mod calendar;
mod calendar_event;
mod task;

pub use calendar::{Calendar, CalendarCreation};
pub use calendar_event::{CalendarEvent, CalendarEventCreation, NewCalendarEvent};
pub use task::Task;
