use std::sync::Arc;

use calrest_core::config::ServerConfig;
use calrest_core::model::{Calendar, CalendarEvent};
use calrest_core::{CalrestResult, Datasets, RecordStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub calendars: Arc<RecordStore<Calendar>>,
    pub events: Arc<RecordStore<CalendarEvent>>,
}

impl AppState {
    /// Seed the stores from the configured sources.
    pub fn load(config: &ServerConfig) -> CalrestResult<Self> {
        Ok(Self::from(Datasets::load(config)?))
    }
}

impl From<Datasets> for AppState {
    fn from(datasets: Datasets) -> Self {
        AppState {
            calendars: datasets.calendars,
            events: datasets.events,
        }
    }
}
