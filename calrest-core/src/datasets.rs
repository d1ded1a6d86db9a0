//! The process-wide set of stores, one per entity type.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::CalrestResult;
use crate::model::{Calendar, CalendarEvent};
use crate::store::RecordStore;

/// Stores backing the calendar and event services.
///
/// Built once at startup and handed to request handlers by `Arc`.
#[derive(Clone)]
pub struct Datasets {
    pub calendars: Arc<RecordStore<Calendar>>,
    pub events: Arc<RecordStore<CalendarEvent>>,
}

impl Datasets {
    /// Seed both stores from the sources named in `config`.
    pub fn load(config: &ServerConfig) -> CalrestResult<Self> {
        let calendars = config.calendars_source().load()?;
        let events = config.events_source().load()?;
        Self::from_seeds(calendars, events)
    }

    pub fn from_seeds(calendars: Vec<Calendar>, events: Vec<CalendarEvent>) -> CalrestResult<Self> {
        Ok(Datasets {
            calendars: Arc::new(RecordStore::new(calendars)?),
            events: Arc::new(RecordStore::new(events)?),
        })
    }
}
