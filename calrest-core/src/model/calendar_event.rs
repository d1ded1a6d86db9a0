use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Task;
use crate::query::Query;
use crate::record::Record;

/// An event belonging to a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Identity of the owning [`crate::model::Calendar`]. Not checked by the store.
    #[serde(default)]
    pub calendar_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Request body for creating an event. The calendar comes from the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventCreation {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Everything the store needs to create an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalendarEvent {
    pub calendar_id: String,
    pub event: CalendarEventCreation,
}

impl CalendarEventCreation {
    pub fn in_calendar(self, calendar_id: impl Into<String>) -> NewCalendarEvent {
        NewCalendarEvent {
            calendar_id: calendar_id.into(),
            event: self,
        }
    }
}

impl CalendarEvent {
    pub const CALENDAR_ID_FIELD: &'static str = "calendarId";

    /// Matches every event of one calendar.
    pub fn of_calendar(calendar_id: &str) -> Query {
        Query::all().with(Self::CALENDAR_ID_FIELD, calendar_id)
    }

    /// Matches one event, only if it belongs to `calendar_id`.
    pub fn in_calendar(calendar_id: &str, id: &str) -> Query {
        Self::of_calendar(calendar_id).with(Self::ID_FIELD, id)
    }
}

impl Record for CalendarEvent {
    type Creation = NewCalendarEvent;
    const KIND: &'static str = "CalendarEvent";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn from_creation(id: String, input: NewCalendarEvent) -> Self {
        let NewCalendarEvent { calendar_id, event } = input;
        CalendarEvent {
            id,
            calendar_id,
            start_date: event.start_date,
            end_date: event.end_date,
            name: event.name,
            tasks: event.tasks,
        }
    }
}
