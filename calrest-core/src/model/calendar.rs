use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A named calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// Assigned by the store.
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
}

/// Request body for creating a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCreation {
    pub name: String,
}

impl Record for Calendar {
    type Creation = CalendarCreation;
    const KIND: &'static str = "Calendar";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn from_creation(id: String, input: CalendarCreation) -> Self {
        Calendar {
            id,
            name: input.name,
        }
    }
}
